//! Error types for the sink module.

use thiserror::Error;

/// Errors raised while writing to an event sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink was already closed by its owner.
    #[error("sink is closed")]
    Closed,

    /// The receiving side went away (client disconnected).
    #[error("client disconnected")]
    Disconnected,

    /// The event could not be encoded.
    #[error("failed to encode event: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The transport refused the write.
    #[error("transport rejected write: {0}")]
    Rejected(String),
}
