use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::traits::FrameVisitor;
use crate::core::particle::Particle;
use crate::systems::palette::Color;

/// One filled circle, read by the JS renderer straight out of wasm memory.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// Canvas X (origin top-left).
    pub x: f32,
    /// Canvas Y (origin top-left).
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub _pad: f32,
}

impl CircleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One end of a line segment. Consecutive pairs form a segment.
/// 6 floats per vertex (x, y, r, g, b, a).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flattened draw data for one frame.
pub struct RenderBuffer {
    pub circles: Vec<CircleInstance>,
    pub lines: Vec<LineVertex>,
    /// Alpha of the background clear; below 1 leaves fading trails.
    pub clear_alpha: f32,
    width: f32,
    height: f32,
    center: Vec2,
    color: Color,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024, 4096)
    }

    pub fn with_capacity(circles: usize, line_vertices: usize) -> Self {
        Self {
            circles: Vec::with_capacity(circles),
            lines: Vec::with_capacity(line_vertices),
            clear_alpha: 1.0,
            width: 0.0,
            height: 0.0,
            center: Vec2::ZERO,
            color: Color::default(),
        }
    }

    /// Drop last frame's data and move the simulation origin to the center
    /// of a `width` x `height` canvas.
    pub fn begin_frame(&mut self, width: f32, height: f32, clear_alpha: f32) {
        self.circles.clear();
        self.lines.clear();
        self.clear_alpha = clear_alpha;
        self.width = width;
        self.height = height;
        self.center = Vec2::new(width / 2.0, height / 2.0);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn circle_count(&self) -> u32 {
        self.circles.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Raw pointer to circle data for reads from JS.
    pub fn circles_ptr(&self) -> *const f32 {
        self.circles.as_ptr() as *const f32
    }

    /// Raw pointer to line vertex data for reads from JS.
    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    pub fn circle_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.circles)
    }

    pub fn line_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.lines)
    }

    fn vertex(&self, at: Vec2) -> LineVertex {
        let p = at + self.center;
        LineVertex {
            x: p.x,
            y: p.y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameVisitor for RenderBuffer {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn particle(&mut self, _ring_index: usize, particle: &Particle) {
        let p = particle.xy() + self.center;
        self.circles.push(CircleInstance {
            x: p.x,
            y: p.y,
            radius: particle.radius as f32,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
            _pad: 0.0,
        });
    }

    fn connection(&mut self, _ring_index: usize, from: &Particle, to: &Particle) {
        let a = self.vertex(from.xy());
        let b = self.vertex(to.xy());
        self.lines.push(a);
        self.lines.push(b);
    }
}
