//! Technical indicators computed from daily closes.

pub mod structure;
pub mod trend;

pub use structure::*;
pub use trend::*;
