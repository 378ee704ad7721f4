//! Background jobs: one long-latency generation started alongside the
//! foreground stream and joined exactly once.

mod error;
mod runner;

pub use error::JobError;
pub use runner::{JobHandle, JobRunner};
