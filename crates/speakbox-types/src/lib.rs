pub mod geometry;
pub mod types;

pub use geometry::{Point, Region, ResizeMode};
pub use types::*;
