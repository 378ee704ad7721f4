//! Types for the generator module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input of one artifact generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// User prompt, passed through verbatim.
    pub prompt: String,
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

/// Descriptor of a generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Where the client can fetch the artifact.
    pub url: String,
    /// Actual width in pixels.
    pub width: u32,
    /// Actual height in pixels.
    pub height: u32,
}

/// Errors that can occur while generating an artifact.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Could not reach the backend.
    #[error("connection to generator failed: {0}")]
    ConnectionFailed(String),

    /// The backend did not answer in time.
    #[error("generator request timed out")]
    Timeout,

    /// The backend answered with an error status.
    #[error("generator returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The backend answered with something we could not understand.
    #[error("invalid generator response: {0}")]
    InvalidResponse(String),

    /// Generation itself failed.
    #[error("generation failed: {0}")]
    Failed(String),
}

impl GeneratorError {
    /// Creates a generic generation failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_serialization() {
        let artifact = Artifact {
            url: "https://example.com/x.png".to_string(),
            width: 512,
            height: 512,
        };
        let json = serde_json::to_string(&artifact).unwrap();
        let parsed: Artifact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, artifact);
    }

    #[test]
    fn test_error_display() {
        let err = GeneratorError::Api {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "generator returned HTTP 503: overloaded");
        assert_eq!(
            GeneratorError::failed("out of memory").to_string(),
            "generation failed: out of memory"
        );
    }
}
