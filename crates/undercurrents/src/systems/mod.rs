pub mod neighbors;
pub mod palette;
pub mod render;
pub mod spawn;
pub mod step;
