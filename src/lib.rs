pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scene;
pub mod tessellation;

pub use error::{KnotvisError, Result};
