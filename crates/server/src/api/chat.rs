//! Streaming chat endpoint.
//!
//! Each request gets its own session. The orchestrator runs in a spawned task
//! and writes NDJSON lines into a bounded channel; the receiving half becomes
//! the chunked response body. When the client goes away the body stream is
//! dropped, the next write fails, and the session ends as failed.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use chatstream_core::{channel_sink, StreamParams};

use crate::state::AppState;

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson; charset=utf-8";

/// Body of `POST /api/chat-stream`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ChatStreamRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl ChatStreamRequest {
    /// Requested dimensions, falling back to the configured defaults for
    /// anything missing or zero.
    fn params(&self, defaults: StreamParams) -> StreamParams {
        StreamParams {
            width: self.width.filter(|w| *w > 0).unwrap_or(defaults.width),
            height: self.height.filter(|h| *h > 0).unwrap_or(defaults.height),
        }
    }
}

pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatStreamRequest>,
) -> Response {
    let stream_config = state.stream_config();
    let params = request.params(StreamParams::from(stream_config));
    let prompt = request.prompt.unwrap_or_default();

    let (sink, rx) = channel_sink(stream_config.channel_capacity);
    let orchestrator = state.orchestrator();

    tokio::spawn(async move {
        let summary = orchestrator.run(&prompt, params, sink).await;
        debug!(
            session_id = %summary.session_id,
            state = summary.state.as_str(),
            events = summary.events_emitted,
            duration_ms = summary.duration_ms,
            "Stream finished"
        );
    });

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, NDJSON_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fields_are_optional() {
        let request: ChatStreamRequest = serde_json::from_str("{}").unwrap();
        assert!(request.prompt.is_none());
        assert!(request.width.is_none());
        assert!(request.height.is_none());
    }

    #[test]
    fn test_params_fall_back_to_defaults() {
        let defaults = StreamParams {
            width: 512,
            height: 512,
        };

        let request = ChatStreamRequest {
            width: Some(800),
            height: Some(0),
            ..Default::default()
        };
        let params = request.params(defaults);
        assert_eq!(params.width, 800);
        assert_eq!(params.height, 512);
    }
}
