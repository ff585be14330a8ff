pub mod command;
pub mod queue;

pub use command::{Command, CONTROLS};
pub use queue::{InputEvent, InputQueue};
