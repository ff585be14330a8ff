//! The seam between the simulation and whatever draws it.
//!
//! [`Simulation::visit`](crate::api::simulation::Simulation::visit) walks one
//! frame's visible geometry and reports it through [`FrameVisitor`]. The
//! in-crate [`RenderBuffer`](super::instance::RenderBuffer) flattens it into
//! GPU-ready arrays; native backends can implement the trait directly.

use crate::core::particle::Particle;
use crate::systems::palette::Color;

pub trait FrameVisitor {
    /// Every following element uses `color` until the next call.
    fn set_color(&mut self, color: Color);

    /// A born particle of ring `ring_index`. Coordinates are relative to the
    /// simulation center.
    fn particle(&mut self, ring_index: usize, particle: &Particle);

    /// A line from `from` to the later particle `to`, both in ring `ring_index`.
    fn connection(&mut self, ring_index: usize, from: &Particle, to: &Particle);
}
