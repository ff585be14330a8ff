//! Color selection: the 1536-entry rainbow, the RYB corner table and the
//! per-frame color plan.
//!
//! Palette indices go through the rainbow first, and the resulting triple is
//! then read as red/yellow/blue amounts and mapped to RGB through
//! [`RybPalette::interpolate`].

use rand::Rng;

use crate::core::particle::{Particle, MAX_COLORS};

/// Straight RGBA in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn from_rgb(rgb: [f32; 3], a: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }
}

/// Rainbow triple for palette index `idx` (taken modulo [`MAX_COLORS`]).
///
/// Six bands of 256 steps, each ramping a single channel:
/// red→yellow→green→cyan→blue→magenta→red.
pub fn rainbow(idx: u32) -> [f32; 3] {
    let idx = idx % MAX_COLORS;
    let t = (idx % 256) as f32 / 256.0;
    match idx / 256 {
        0 => [1.0, t, 0.0],
        1 => [1.0 - t, 1.0, 0.0],
        2 => [0.0, 1.0, t],
        3 => [0.0, 1.0 - t, 1.0],
        4 => [t, 0.0, 1.0],
        _ => [1.0, 0.0, 1.0 - t],
    }
}

fn cubic(t: f32, a: f32, b: f32) -> f32 {
    let weight = t * t * (3.0 - 2.0 * t);
    a + weight * (b - a)
}

/// The eight RGB corners of the red/yellow/blue cube.
///
/// Corner order is `(r, y, b)` = 000, 010, 100, 110, 001, 011, 101, 111.
#[derive(Debug, Clone, PartialEq)]
pub struct RybPalette {
    corners: [[f32; 3]; 8],
}

impl RybPalette {
    /// The classic painter's table: white, yellow, red, orange, blue, green,
    /// purple, near-black.
    pub const CLASSIC: [[f32; 3]; 8] = [
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 0.5, 0.0],
        [0.163, 0.373, 0.6],
        [0.0, 0.66, 0.2],
        [0.5, 0.0, 0.5],
        [0.2, 0.094, 0.0],
    ];

    pub fn new(corners: [[f32; 3]; 8]) -> Self {
        Self { corners }
    }

    pub fn corners(&self) -> &[[f32; 3]; 8] {
        &self.corners
    }

    /// Replace every corner with a uniform draw in `[0, 1)`.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        for corner in self.corners.iter_mut() {
            for channel in corner.iter_mut() {
                *channel = rng.gen::<f32>();
            }
        }
    }

    /// Map `[r, y, b]` amounts to RGB by smoothed trilinear interpolation:
    /// blue first, then yellow, then red.
    pub fn interpolate(&self, ryb: [f32; 3]) -> [f32; 3] {
        let [r, y, b] = ryb;
        let m = &self.corners;
        let mut rgb = [0.0; 3];
        for (c, out) in rgb.iter_mut().enumerate() {
            let x0 = cubic(b, m[0][c], m[4][c]);
            let x1 = cubic(b, m[1][c], m[5][c]);
            let x2 = cubic(b, m[2][c], m[6][c]);
            let x3 = cubic(b, m[3][c], m[7][c]);
            let y0 = cubic(y, x0, x1);
            let y1 = cubic(y, x2, x3);
            *out = cubic(r, y0, y1);
        }
        rgb
    }

    /// Full lookup for a palette index.
    pub fn color(&self, idx: u32, alpha: f32) -> Color {
        Color::from_rgb(self.interpolate(rainbow(idx)), alpha)
    }
}

impl Default for RybPalette {
    fn default() -> Self {
        Self::new(Self::CLASSIC)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// One color for the whole frame.
    #[default]
    Solid,
    /// One color per ring, spread over `ringsMaximum`.
    Ringed,
    /// Color follows the particle's angle.
    Circular,
    /// Each particle keeps its own palette offset.
    Individual,
}

impl ColorMode {
    /// The mode the `m` key switches to.
    pub fn next(self) -> Self {
        match self {
            ColorMode::Solid => ColorMode::Ringed,
            ColorMode::Ringed => ColorMode::Circular,
            ColorMode::Circular => ColorMode::Individual,
            ColorMode::Individual => ColorMode::Solid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Solid => "solid",
            ColorMode::Ringed => "ringed",
            ColorMode::Circular => "circular",
            ColorMode::Individual => "individual",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rainbow cycle offset, kept in `(0, MAX_COLORS]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorCycle {
    index: f32,
}

impl ColorCycle {
    /// Move by `delta_ms / 1000 * speed` palette steps and wrap.
    pub fn advance(&mut self, delta_ms: u32, speed: i32) {
        let max = MAX_COLORS as f32;
        self.index = (self.index + delta_ms as f32 / 1000.0 * speed as f32).rem_euclid(max);
        if self.index <= 0.0 {
            self.index += max;
        }
    }

    pub fn index(&self) -> f32 {
        self.index
    }

    /// Integer palette offset.
    pub fn offset(&self) -> u32 {
        self.index as u32
    }
}

/// Which color to set at which point of a frame. Built once per frame so the
/// mode is not re-checked per particle.
#[derive(Debug, Clone, Copy)]
pub struct ColorPlan<'a> {
    pub mode: ColorMode,
    palette: &'a RybPalette,
    offset: u32,
    alpha: f32,
    rings_maximum: u32,
}

impl<'a> ColorPlan<'a> {
    pub fn new(mode: ColorMode, palette: &'a RybPalette, cycle: ColorCycle, alpha: f32, rings_maximum: i32) -> Self {
        Self {
            mode,
            palette,
            offset: cycle.offset(),
            alpha,
            rings_maximum: rings_maximum.max(1) as u32,
        }
    }

    /// Set once before any ring in [`ColorMode::Solid`].
    pub fn frame_color(&self) -> Option<Color> {
        match self.mode {
            ColorMode::Solid => Some(self.resolve(self.offset)),
            _ => None,
        }
    }

    /// Set at the start of ring `ring_index` in [`ColorMode::Ringed`].
    pub fn ring_color(&self, ring_index: usize) -> Option<Color> {
        match self.mode {
            ColorMode::Ringed => {
                let spread = (ring_index as u64 * MAX_COLORS as u64 / self.rings_maximum as u64) as u32;
                Some(self.resolve(self.offset.wrapping_add(spread)))
            }
            _ => None,
        }
    }

    /// Set before each particle in the per-particle modes.
    pub fn particle_color(&self, particle: &Particle) -> Option<Color> {
        match self.mode {
            ColorMode::Circular => {
                let angle = (particle.position() / 360.0 * MAX_COLORS as f32) as u32;
                Some(self.resolve(angle.wrapping_add(self.offset)))
            }
            ColorMode::Individual => Some(self.resolve(particle.color.wrapping_add(self.offset))),
            _ => None,
        }
    }

    fn resolve(&self, idx: u32) -> Color {
        self.palette.color(idx % MAX_COLORS, self.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(&b).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn rainbow_band_starts() {
        assert_eq!(rainbow(0), [1.0, 0.0, 0.0]);
        assert_eq!(rainbow(256), [1.0, 1.0, 0.0]);
        assert_eq!(rainbow(512), [0.0, 1.0, 0.0]);
        assert_eq!(rainbow(768), [0.0, 1.0, 1.0]);
        assert_eq!(rainbow(1024), [0.0, 0.0, 1.0]);
        assert_eq!(rainbow(1280), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn rainbow_wraps() {
        assert_eq!(rainbow(MAX_COLORS), rainbow(0));
        assert_eq!(rainbow(MAX_COLORS + 300), rainbow(300));
        assert_eq!(rainbow(128), [1.0, 0.5, 0.0]);
    }

    #[test]
    fn interpolate_hits_corners() {
        let palette = RybPalette::default();
        assert!(close(palette.interpolate([0.0, 0.0, 0.0]), [1.0, 1.0, 1.0]));
        assert!(close(palette.interpolate([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0]));
        assert!(close(palette.interpolate([0.0, 1.0, 0.0]), [1.0, 1.0, 0.0]));
        assert!(close(palette.interpolate([0.0, 0.0, 1.0]), [0.163, 0.373, 0.6]));
        assert!(close(palette.interpolate([1.0, 1.0, 1.0]), [0.2, 0.094, 0.0]));
    }

    #[test]
    fn interpolate_midpoint_averages_corners() {
        let palette = RybPalette::new([[0.0; 3], [0.0; 3], [1.0; 3], [1.0; 3], [0.0; 3], [0.0; 3], [1.0; 3], [1.0; 3]]);
        assert!(close(palette.interpolate([0.5, 0.3, 0.8]), [0.5, 0.5, 0.5]));
    }

    #[test]
    fn randomized_corners_stay_in_range() {
        let mut palette = RybPalette::default();
        let mut rng = ChaChaRng::seed_from_u64(42);
        palette.randomize(&mut rng);
        assert_ne!(palette.corners(), &RybPalette::CLASSIC);
        assert!(palette.corners().iter().flatten().all(|c| (0.0..1.0).contains(c)));
    }

    #[test]
    fn color_mode_cycles_through_all_four() {
        let mut mode = ColorMode::Solid;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(mode, ColorMode::Solid);
        assert_eq!(
            seen,
            vec![ColorMode::Solid, ColorMode::Ringed, ColorMode::Circular, ColorMode::Individual]
        );
    }

    #[test]
    fn cycle_stays_in_half_open_range() {
        let mut cycle = ColorCycle::default();
        cycle.advance(0, 50);
        assert_eq!(cycle.index(), MAX_COLORS as f32);

        cycle.advance(1000, 50);
        assert_eq!(cycle.index(), 50.0);

        cycle.advance(1000, -100);
        assert_eq!(cycle.index(), MAX_COLORS as f32 - 50.0);

        cycle.advance(60_000, 50);
        assert!(cycle.index() > 0.0 && cycle.index() <= MAX_COLORS as f32);
    }

    #[test]
    fn plan_only_answers_for_its_mode() {
        let palette = RybPalette::default();
        let cycle = ColorCycle::default();
        let p = Particle::new(0, 1, 10.0, 0, 10, 90.0, 7);

        let solid = ColorPlan::new(ColorMode::Solid, &palette, cycle, 1.0, 35);
        assert!(solid.frame_color().is_some());
        assert!(solid.ring_color(0).is_none());
        assert!(solid.particle_color(&p).is_none());

        let ringed = ColorPlan::new(ColorMode::Ringed, &palette, cycle, 1.0, 35);
        assert!(ringed.frame_color().is_none());
        assert!(ringed.ring_color(3).is_some());
        assert!(ringed.particle_color(&p).is_none());

        for mode in [ColorMode::Circular, ColorMode::Individual] {
            let plan = ColorPlan::new(mode, &palette, cycle, 1.0, 35);
            assert!(plan.frame_color().is_none());
            assert!(plan.ring_color(0).is_none());
            assert!(plan.particle_color(&p).is_some());
        }
    }

    #[test]
    fn ringed_spreads_over_capacity() {
        let palette = RybPalette::default();
        let plan = ColorPlan::new(ColorMode::Ringed, &palette, ColorCycle::default(), 0.25, 6);
        // Six rings over six bands: ring 1 starts at the yellow band.
        assert_eq!(plan.ring_color(1), Some(palette.color(256, 0.25)));
        assert_eq!(plan.ring_color(6), plan.ring_color(0));
    }

    #[test]
    fn ringed_with_zero_capacity_does_not_divide_by_zero() {
        let palette = RybPalette::default();
        let plan = ColorPlan::new(ColorMode::Ringed, &palette, ColorCycle::default(), 1.0, 0);
        assert!(plan.ring_color(5).is_some());
    }

    #[test]
    fn circular_follows_angle() {
        let palette = RybPalette::default();
        let plan = ColorPlan::new(ColorMode::Circular, &palette, ColorCycle::default(), 1.0, 35);
        let p = Particle::new(0, 1, 10.0, 0, 10, 180.0, 0);
        assert_eq!(plan.particle_color(&p), Some(palette.color(768, 1.0)));
    }

    #[test]
    fn individual_uses_particle_color() {
        let palette = RybPalette::default();
        let mut cycle = ColorCycle::default();
        cycle.advance(1000, 10);
        let plan = ColorPlan::new(ColorMode::Individual, &palette, cycle, 0.5, 35);
        let p = Particle::new(0, 1, 10.0, 0, 10, 0.0, 1530);
        assert_eq!(plan.particle_color(&p), Some(palette.color(4, 0.5)));
    }
}
