//! Signal evaluation: trend, fundamental tiering and dip detection.

pub mod dip;
pub mod engine;
pub mod fundamentals;

pub use dip::*;
pub use engine::*;
pub use fundamentals::*;
