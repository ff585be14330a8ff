use crate::api::simulation::Simulation;
use crate::renderer::instance::RenderBuffer;

/// Rebuild `buffer` from the simulation's current state: canvas size, clear
/// alpha, then every visible circle and line.
pub fn build_render_buffer(sim: &Simulation, buffer: &mut RenderBuffer) {
    let config = sim.config();
    buffer.begin_frame(config.window_width as f32, config.window_height as f32, sim.clear_alpha());
    sim.visit(buffer);
}
