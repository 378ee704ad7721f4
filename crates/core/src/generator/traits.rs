//! Trait definitions for the generator module.

use async_trait::async_trait;

use super::types::{Artifact, GenerationRequest, GeneratorError};

/// A backend that turns a prompt into an artifact, with unspecified latency.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    /// Returns the name of this generator implementation.
    fn name(&self) -> &str;

    /// Generates one artifact.
    async fn generate(&self, request: GenerationRequest) -> Result<Artifact, GeneratorError>;
}
