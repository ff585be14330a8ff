pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{parse_args, usage, ParsedArgs, SimConfig, CONFIG_SCHEMA};
pub use api::simulation::{DisplayState, Simulation};
pub use api::types::{FrameReport, ParticleId, StatusReport};
pub use core::particle::{Particle, MAX_COLORS};
pub use core::pool::ParticlePool;
pub use core::ring::{Ring, RingList};
pub use core::time::{FrameClock, PeriodicTimer};
pub use error::{ConfigError, SimError, EXIT_CONFIG, EXIT_OUT_OF_MEMORY};
pub use input::{Command, InputEvent, InputQueue, CONTROLS};
pub use renderer::{CircleInstance, FrameVisitor, LineVertex, RenderBuffer};
pub use systems::palette::{Color, ColorMode, RybPalette};
pub use systems::render::build_render_buffer;
