//! Price structure: drawdown from the recent high

pub mod drawdown;

pub use drawdown::*;
