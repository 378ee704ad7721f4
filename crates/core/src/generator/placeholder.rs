//! Simulated image generation backed by a placeholder image service.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{Artifact, ArtifactGenerator, GenerationRequest, GeneratorError};

const PLACEHOLDER_BASE_URL: &str = "https://via.placeholder.com";

/// Characters `encodeURIComponent` leaves as-is but `urlencoding` escapes.
const COMPONENT_SAFE: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a query component the way browsers' `encodeURIComponent` does.
///
/// Every `%` in the encoder's output starts an escape, so replacing whole
/// escapes cannot touch an encoded literal `%`.
fn encode_component(value: &str) -> String {
    COMPONENT_SAFE
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escape, ch)| {
            encoded.replace(escape, ch)
        })
}

/// Waits a fixed latency, then returns a placeholder image URL showing the prompt.
#[derive(Debug, Clone)]
pub struct PlaceholderGenerator {
    latency: Duration,
}

impl PlaceholderGenerator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn url_for(request: &GenerationRequest) -> String {
        format!(
            "{}/{}x{}?text={}",
            PLACEHOLDER_BASE_URL,
            request.width,
            request.height,
            encode_component(&request.prompt)
        )
    }
}

impl Default for PlaceholderGenerator {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

#[async_trait]
impl ArtifactGenerator for PlaceholderGenerator {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Artifact, GeneratorError> {
        debug!(
            width = request.width,
            height = request.height,
            latency_ms = self.latency.as_millis() as u64,
            "Simulating image generation"
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(Artifact {
            url: Self::url_for(&request),
            width: request.width,
            height: request.height,
        })
    }
}
