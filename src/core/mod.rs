//! Core application primitives (orchestrator, scheduling, HTTP surface)

pub mod clock;
pub mod context;
pub mod format;
pub mod http;
pub mod orchestrator;
pub mod scheduler;

pub use clock::*;
pub use context::*;
pub use orchestrator::*;
pub use scheduler::*;
