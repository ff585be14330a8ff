pub mod particle;
pub mod pool;
pub mod ring;
pub mod time;
