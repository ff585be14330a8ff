pub mod instance;
pub mod traits;

pub use instance::{CircleInstance, LineVertex, RenderBuffer};
pub use traits::FrameVisitor;
