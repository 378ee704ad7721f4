//! Artifact generators: the slow backends a session waits on.
//!
//! - [`PlaceholderGenerator`] simulates latency and returns a placeholder image URL
//! - [`HttpGenerator`] delegates to a remote generation service
//!
//! # Example
//!
//! ```ignore
//! use chatstream_core::generator::{ArtifactGenerator, GenerationRequest, PlaceholderGenerator};
//!
//! let generator = PlaceholderGenerator::new(Duration::from_millis(100));
//! let artifact = generator
//!     .generate(GenerationRequest { prompt: "a red fox".into(), width: 512, height: 512 })
//!     .await?;
//! println!("ready at {}", artifact.url);
//! ```

mod http;
mod placeholder;
mod traits;
mod types;

pub use http::HttpGenerator;
pub use placeholder::PlaceholderGenerator;
pub use traits::ArtifactGenerator;
pub use types::{Artifact, GenerationRequest, GeneratorError};

use std::sync::Arc;
use std::time::Duration;

use crate::config::{GeneratorBackend, GeneratorConfig};

/// Build the generator selected by configuration.
pub fn create_generator(
    config: &GeneratorConfig,
) -> Result<Arc<dyn ArtifactGenerator>, GeneratorError> {
    match config.backend {
        GeneratorBackend::Placeholder => Ok(Arc::new(PlaceholderGenerator::new(
            Duration::from_millis(config.latency_ms),
        ))),
        GeneratorBackend::Http => {
            let http = config.http.clone().ok_or_else(|| {
                GeneratorError::failed("http backend selected but no [generator.http] section")
            })?;
            Ok(Arc::new(HttpGenerator::new(http)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpGeneratorConfig;

    #[test]
    fn test_create_placeholder_by_default() {
        let generator = create_generator(&GeneratorConfig::default()).unwrap();
        assert_eq!(generator.name(), "placeholder");
    }

    #[test]
    fn test_create_http_requires_section() {
        let config = GeneratorConfig {
            backend: GeneratorBackend::Http,
            ..Default::default()
        };
        assert!(create_generator(&config).is_err());

        let config = GeneratorConfig {
            backend: GeneratorBackend::Http,
            http: Some(HttpGeneratorConfig {
                url: "http://localhost:7860/generate".to_string(),
                api_key: None,
                timeout_secs: 30,
            }),
            ..Default::default()
        };
        assert_eq!(create_generator(&config).unwrap().name(), "http");
    }
}
