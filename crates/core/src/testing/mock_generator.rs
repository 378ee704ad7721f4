//! Mock artifact generator for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::generator::{Artifact, ArtifactGenerator, GenerationRequest, GeneratorError};

/// Mock implementation of the ArtifactGenerator trait.
///
/// Provides controllable behavior for testing:
/// - Record requests for assertions
/// - Simulate latency (honours paused tokio time)
/// - Simulate failures and panics
///
/// # Example
///
/// ```rust,ignore
/// use chatstream_core::testing::MockGenerator;
///
/// let generator = Arc::new(MockGenerator::new());
/// generator.set_latency(Duration::from_millis(300));
/// generator.fail_with("model unavailable");
///
/// let orchestrator = SessionOrchestrator::new(generator.clone(), Script::default());
/// // ...
/// assert_eq!(generator.recorded_requests().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockGenerator {
    requests: Mutex<Vec<GenerationRequest>>,
    latency: Mutex<Duration>,
    failure: Mutex<Option<String>>,
    panic: AtomicBool,
    completed: AtomicUsize,
}

impl MockGenerator {
    /// Create a new mock generator that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every generation by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Make every generation fail with the given reason.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(reason.into());
    }

    /// Stop failing.
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Make every generation panic.
    pub fn panic_on_generate(&self) {
        self.panic.store(true, Ordering::SeqCst);
    }

    /// All requests received so far, in arrival order.
    pub fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of generations that ran to completion (success or failure).
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// URL the mock returns for a request.
    pub fn url_for(request: &GenerationRequest) -> String {
        format!(
            "https://images.test/{}x{}/{}.png",
            request.width,
            request.height,
            urlencoding::encode(&request.prompt)
        )
    }
}

#[async_trait]
impl ArtifactGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Artifact, GeneratorError> {
        self.requests.lock().unwrap().push(request.clone());

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.panic.load(Ordering::SeqCst) {
            panic!("mock generator panicked");
        }

        let failure = self.failure.lock().unwrap().clone();
        self.completed.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = failure {
            return Err(GeneratorError::Failed(reason));
        }

        Ok(Artifact {
            url: Self::url_for(&request),
            width: request.width,
            height: request.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "hello".to_string(),
            width: 64,
            height: 32,
        }
    }

    #[tokio::test]
    async fn test_mock_returns_artifact() {
        let generator = MockGenerator::new();
        let artifact = generator.generate(request()).await.unwrap();
        assert_eq!(artifact.url, "https://images.test/64x32/hello.png");
        assert_eq!(generator.completed_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_failure_can_be_cleared() {
        let generator = MockGenerator::new();
        generator.fail_with("nope");
        assert!(generator.generate(request()).await.is_err());
        generator.clear_failure();
        assert!(generator.generate(request()).await.is_ok());
        assert_eq!(generator.recorded_requests().len(), 2);
    }
}
