//! Remote generation backend reached over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::HttpGeneratorConfig;

use super::{Artifact, ArtifactGenerator, GenerationRequest, GeneratorError};

/// POSTs `{prompt, width, height}` to a configured endpoint and expects
/// `{url, width, height}` back.
pub struct HttpGenerator {
    client: Client,
    config: HttpGeneratorConfig,
}

impl HttpGenerator {
    /// Create a new HttpGenerator with the given configuration.
    pub fn new(config: HttpGeneratorConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| GeneratorError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ArtifactGenerator for HttpGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Artifact, GeneratorError> {
        debug!(url = %self.config.url, "Requesting artifact from HTTP generator");

        let mut builder = self.client.post(&self.config.url).json(&request);
        if let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GeneratorError::Timeout
            } else {
                GeneratorError::ConnectionFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let artifact: Artifact = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        if artifact.url.is_empty() {
            return Err(GeneratorError::InvalidResponse(
                "response has an empty url".to_string(),
            ));
        }

        Ok(artifact)
    }
}
