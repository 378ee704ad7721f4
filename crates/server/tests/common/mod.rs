//! Common test utilities for in-process HTTP testing.
//!
//! This module provides a test fixture that builds the real router with a
//! mock generator injected, so streaming sessions can be exercised without a
//! network listener or an image backend.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use chatstream_core::{
    testing::MockGenerator, Config, Script, SessionOrchestrator, StreamEvent,
};
use chatstream_server::state::AppState;

/// Re-export fixtures for test convenience
pub use chatstream_core::testing::fixtures;

/// Test fixture for in-process HTTP testing.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_stream() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.chat_stream(json!({ "prompt": "hello" })).await;
///
///     assert_eq!(response.status, 200);
///     fixtures::assert_well_formed(&response.events);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock generator - control latency and failures
    pub generator: Arc<MockGenerator>,
}

/// JSON response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Streaming response, decoded line by line
#[derive(Debug)]
pub struct StreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub lines: Vec<String>,
    pub events: Vec<StreamEvent>,
}

impl TestFixture {
    /// Create a fixture with default config and no pauses between steps.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a fixture with a custom config. Step delays are forced to zero.
    pub fn with_config(config: Config) -> Self {
        let generator = Arc::new(MockGenerator::new());
        let orchestrator = SessionOrchestrator::new(
            generator.clone(),
            Script::image_reply(Duration::ZERO),
        )
        .with_job_timeout(config.job.timeout_ms.map(Duration::from_millis));

        let state = Arc::new(AppState::new(config, Arc::new(orchestrator)));
        let router = chatstream_server::api::create_router(state);

        Self { router, generator }
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let (status, headers, bytes) = self.send(request).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a GET request and return the raw body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let (status, _, bytes) = self.send(request).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// POST to the chat stream endpoint and collect the whole stream.
    pub async fn chat_stream(&self, body: Value) -> StreamResponse {
        self.post_raw("/api/chat-stream", &body.to_string()).await
    }

    /// POST a raw body with a JSON content type.
    pub async fn post_raw(&self, path: &str, body: &str) -> StreamResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, headers, bytes) = self.send(request).await;
        let text = String::from_utf8(bytes).expect("Body is not UTF-8");
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let events = if status.is_success() {
            lines
                .iter()
                .map(|line| StreamEvent::from_ndjson(line.as_bytes()).expect("Invalid event line"))
                .collect()
        } else {
            Vec::new()
        };

        StreamResponse {
            status,
            headers,
            lines,
            events,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        (status, headers, bytes)
    }
}
