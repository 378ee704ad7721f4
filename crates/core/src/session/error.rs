//! Error types for the session module.

use thiserror::Error;

use crate::job::JobError;
use crate::sink::SinkError;

/// A script asked the orchestrator to do something it cannot do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestrationFault {
    /// `AwaitJob` with no job in flight.
    #[error("script awaits a background job that was never started (step {step})")]
    NoJobStarted { step: usize },

    /// `StartJob` while another job is still in flight.
    #[error("script starts a second background job while one is in flight (step {step})")]
    JobAlreadyRunning { step: usize },

    /// `StartJob` before any `ImageHint` declared a placeholder.
    #[error("script starts a background job before announcing a placeholder (step {step})")]
    MissingPlaceholder { step: usize },

    /// The script ended while a job was still in flight.
    #[error("script ended without awaiting its background job")]
    JobNeverAwaited,
}

/// Anything that ends a session in the `Failed` state.
///
/// The display string becomes the `message` of the terminal `error` event.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Fault(#[from] OrchestrationFault),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_transparent() {
        let err = SessionError::from(JobError::Timeout { timeout_ms: 250 });
        assert_eq!(err.to_string(), "image generation timed out after 250 ms");

        let err = SessionError::from(OrchestrationFault::NoJobStarted { step: 3 });
        assert_eq!(
            err.to_string(),
            "script awaits a background job that was never started (step 3)"
        );

        let err = SessionError::from(SinkError::Disconnected);
        assert_eq!(err.to_string(), "client disconnected");
    }
}
