use undercurrents::{
    build_render_buffer, ConfigError, InputEvent, InputQueue, RenderBuffer, SimConfig, SimError,
    Simulation, StatusReport,
};

/// Wires the simulation to the browser frame loop.
///
/// The bridge keeps one `SimRunner` in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export a
/// struct that borrows its internals out to JS by raw pointer.
pub struct SimRunner {
    sim: Simulation,
    input: InputQueue,
    render_buffer: RenderBuffer,
    last_status: StatusReport,
    /// The render buffer was rebuilt this frame. Paused frames keep the
    /// previous canvas untouched.
    drawn: bool,
}

impl SimRunner {
    pub fn new(sim: Simulation) -> Self {
        let last_status = sim.status();
        Self {
            sim,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            last_status,
            drawn: false,
        }
    }

    /// Build a runner from a JSON configuration object. An empty string means
    /// every default.
    pub fn from_json(json: &str, seed: u64) -> Result<Self, ConfigError> {
        let config = if json.trim().is_empty() {
            SimConfig::default()
        } else {
            SimConfig::from_json(json)?
        };
        Ok(Self::new(Simulation::new(config, seed)?))
    }

    /// Push an input event into the queue. Applied at the start of the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at monotonic time `now_ms` and rebuild the render buffer.
    pub fn tick(&mut self, now_ms: f64) -> Result<(), SimError> {
        self.drawn = false;
        if !self.sim.is_running() {
            return Ok(());
        }

        let report = self.sim.frame(now_ms.max(0.0) as u64, &mut self.input)?;
        if let Some(status) = report.status {
            self.last_status = status;
        }

        if self.sim.is_running() && !self.sim.is_paused() {
            build_render_buffer(&self.sim, &mut self.render_buffer);
            self.drawn = true;
        }
        Ok(())
    }

    pub fn set_option(&mut self, name: &str, value: i32) -> Result<(), ConfigError> {
        self.sim.set_option(name, value)
    }

    pub fn get_option(&self, name: &str) -> Option<i32> {
        self.sim.config().get_option(name)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn frame_drawn(&self) -> bool {
        self.drawn
    }

    // ---- Pointer accessors for reads from wasm memory ----

    pub fn circles_ptr(&self) -> *const f32 {
        self.render_buffer.circles_ptr()
    }

    pub fn circle_count(&self) -> u32 {
        self.render_buffer.circle_count()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.render_buffer.lines_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.render_buffer.line_vertex_count()
    }

    pub fn clear_alpha(&self) -> f32 {
        self.render_buffer.clear_alpha
    }

    pub fn canvas_width(&self) -> i32 {
        self.sim.config().window_width
    }

    pub fn canvas_height(&self) -> i32 {
        self.sim.config().window_height
    }

    // ---- Status counters from the last status event ----

    /// Infinite when the status event fired on a zero delta.
    pub fn fps(&self) -> f32 {
        self.last_status.fps.unwrap_or(f32::INFINITY)
    }

    pub fn ring_count(&self) -> u32 {
        self.last_status.ring_count as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.last_status.particle_count as u32
    }

    pub fn recycled_particles(&self) -> u32 {
        self.last_status.recycled_particles as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BORN: &str = r#"{"particleBornTimerMaximum": 0, "windowWidth": 300, "windowHeight": 200}"#;

    #[test]
    fn empty_json_uses_defaults() {
        let runner = SimRunner::from_json("  ", 1).unwrap();
        assert_eq!(runner.canvas_width(), 1200);
        assert_eq!(runner.get_option("ringsMaximum"), Some(35));
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = SimRunner::from_json(r#"{"ringsMaximum": -4}"#, 1).err().unwrap();
        assert_eq!(err.exit_code(), 1);
        assert!(SimRunner::from_json(r#"{"nope": 1}"#, 1).is_err());
    }

    #[test]
    fn tick_fills_buffers() {
        let mut runner = SimRunner::from_json(BORN, 9).unwrap();
        runner.tick(1000.0).unwrap();
        assert!(runner.frame_drawn());
        assert_eq!(runner.circle_count(), 4);
        assert_eq!(runner.ring_count(), 0, "first status precedes the first spawn");
        assert_eq!(runner.fps(), f32::INFINITY);
        assert!((runner.clear_alpha() - 7.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn paused_frames_are_not_redrawn() {
        let mut runner = SimRunner::from_json(BORN, 9).unwrap();
        runner.tick(0.0).unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: 80 });
        runner.tick(16.0).unwrap();
        assert!(!runner.frame_drawn());
        assert_eq!(runner.circle_count(), 4, "last drawn frame is kept");
    }

    #[test]
    fn resize_applies_on_next_tick() {
        let mut runner = SimRunner::from_json(BORN, 9).unwrap();
        runner.push_input(InputEvent::Resize { width: 800, height: 600 });
        assert_eq!(runner.canvas_width(), 300);
        runner.tick(0.0).unwrap();
        assert_eq!((runner.canvas_width(), runner.canvas_height()), (800, 600));
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut runner = SimRunner::from_json(BORN, 9).unwrap();
        runner.tick(0.0).unwrap();
        runner.push_input(InputEvent::KeyDown { key_code: 27 });
        runner.tick(16.0).unwrap();
        assert!(!runner.is_running());
        assert!(!runner.frame_drawn());
    }

    #[test]
    fn set_option_validates() {
        let mut runner = SimRunner::from_json(BORN, 9).unwrap();
        runner.set_option("alphaElements", 80).unwrap();
        assert_eq!(runner.get_option("alphaElements"), Some(80));
        assert!(runner.set_option("particleHeightMaximum", -1).is_err());
        assert_eq!(runner.simulation().config().particle_height_maximum, 5);
    }
}
