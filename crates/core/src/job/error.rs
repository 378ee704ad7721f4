//! Error types for the job module.

use thiserror::Error;

use crate::generator::GeneratorError;

/// Outcome of a background job that did not produce an artifact.
#[derive(Debug, Error)]
pub enum JobError {
    /// The generator reported a failure.
    #[error("image generation failed: {0}")]
    Failed(#[from] GeneratorError),

    /// The job did not resolve before the configured deadline.
    #[error("image generation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The job task panicked.
    #[error("image generation job panicked")]
    Panicked,

    /// The job task was cancelled before it resolved.
    #[error("image generation job was aborted")]
    Aborted,
}

impl JobError {
    /// Label used for metrics.
    pub fn result_label(&self) -> &'static str {
        match self {
            Self::Failed(_) => "failed",
            Self::Timeout { .. } => "timeout",
            Self::Panicked => "panicked",
            Self::Aborted => "aborted",
        }
    }
}
