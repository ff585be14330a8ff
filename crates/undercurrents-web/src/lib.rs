//! Browser bridge: one simulation per page, driven by `requestAnimationFrame`
//! timestamps. Circles and line vertices are read by the JS renderer straight
//! out of wasm memory through the pointer accessors.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use undercurrents::{parse_args, usage, ConfigError, InputEvent, SimError, Simulation, CONTROLS};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => f(runner),
            None => wasm_bindgen::throw_str("Simulation not initialized. Call sim_init() first."),
        }
    })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn install(runner: SimRunner) {
    log::info!("{}", runner.simulation().config().describe());
    log::info!("{}", CONTROLS);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("undercurrents: initialized");
}

fn config_failure(e: ConfigError) -> ! {
    log::error!("{}", e);
    wasm_bindgen::throw_str(&format!("{} (exit code {})", e, e.exit_code()))
}

fn sim_failure(e: SimError) -> ! {
    log::error!("{}", e);
    wasm_bindgen::throw_str(&format!("{} (exit code {})", e, e.exit_code()))
}

/// Start from a JSON configuration object (`""` for defaults).
#[wasm_bindgen]
pub fn sim_init(config_json: &str) {
    init_logging();
    let runner = SimRunner::from_json(config_json, random_seed()).unwrap_or_else(|e| config_failure(e));
    install(runner);
}

/// Start from command-line style arguments, e.g. from a URL query string.
/// Returns `false` after printing the help text when `-h` was given.
#[wasm_bindgen]
pub fn sim_init_args(args: Vec<String>) -> bool {
    init_logging();
    let parsed = parse_args(&args).unwrap_or_else(|e| config_failure(e));
    if parsed.help {
        web_sys::console::log_1(&JsValue::from_str(&usage(&parsed.config)));
        return false;
    }

    let sim = Simulation::new(parsed.config, random_seed())
        .unwrap_or_else(|e| config_failure(e))
        .with_paused(parsed.paused);
    install(SimRunner::new(sim));
    true
}

#[wasm_bindgen]
pub fn sim_tick(now_ms: f64) {
    with_runner(|r| r.tick(now_ms)).unwrap_or_else(|e| sim_failure(e));
}

#[wasm_bindgen]
pub fn sim_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn sim_resize(width: i32, height: i32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn sim_quit() {
    with_runner(|r| r.push_input(InputEvent::Quit));
}

#[wasm_bindgen]
pub fn sim_set_option(name: &str, value: i32) -> Result<(), JsValue> {
    with_runner(|r| r.set_option(name, value)).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn sim_get_option(name: &str) -> Option<i32> {
    with_runner(|r| r.get_option(name))
}

#[wasm_bindgen]
pub fn sim_usage() -> String {
    with_runner(|r| usage(r.simulation().config()))
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn sim_circles_ptr() -> *const f32 {
    with_runner(|r| r.circles_ptr())
}

#[wasm_bindgen]
pub fn sim_circle_count() -> u32 {
    with_runner(|r| r.circle_count())
}

#[wasm_bindgen]
pub fn sim_lines_ptr() -> *const f32 {
    with_runner(|r| r.lines_ptr())
}

#[wasm_bindgen]
pub fn sim_line_vertex_count() -> u32 {
    with_runner(|r| r.line_vertex_count())
}

#[wasm_bindgen]
pub fn sim_clear_alpha() -> f32 {
    with_runner(|r| r.clear_alpha())
}

#[wasm_bindgen]
pub fn sim_frame_drawn() -> bool {
    with_runner(|r| r.frame_drawn())
}

#[wasm_bindgen]
pub fn sim_canvas_width() -> i32 {
    with_runner(|r| r.canvas_width())
}

#[wasm_bindgen]
pub fn sim_canvas_height() -> i32 {
    with_runner(|r| r.canvas_height())
}

#[wasm_bindgen]
pub fn sim_running() -> bool {
    with_runner(|r| r.is_running())
}

// ---- Status accessors ----

#[wasm_bindgen]
pub fn sim_fps() -> f32 {
    with_runner(|r| r.fps())
}

#[wasm_bindgen]
pub fn sim_ring_count() -> u32 {
    with_runner(|r| r.ring_count())
}

#[wasm_bindgen]
pub fn sim_particle_count() -> u32 {
    with_runner(|r| r.particle_count())
}

#[wasm_bindgen]
pub fn sim_recycled_particles() -> u32 {
    with_runner(|r| r.recycled_particles())
}
