//! Stream event model and its NDJSON wire form.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Error code carried by every `error` event.
pub const SERVER_ERROR_CODE: &str = "SERVER_ERROR";

/// Discriminator written to the `type` field of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum EventKind {
    Text,
    ImageHint,
    ImageReady,
    Error,
    Done,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::ImageHint => "image_hint",
            Self::ImageReady => "image_ready",
            Self::Error => "error",
            Self::Done => "done",
        }
    }

    /// Whether this kind ends a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error | Self::Done)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific body of an event, before it is stamped with a session and sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventPayload {
    /// A fragment of generated text.
    Text(String),
    /// A placeholder the client should reserve for an artifact that is still generating.
    ImageHint { placeholder_id: String, hint: String },
    /// The artifact for a previously announced placeholder is available.
    ImageReady {
        placeholder_id: String,
        url: String,
        width: u32,
        height: u32,
    },
    /// The session failed. Always terminal.
    Error { message: String, code: String },
    /// The session completed. Always terminal.
    Done { duration_ms: u64 },
}

impl EventPayload {
    pub fn text(fragment: impl Into<String>) -> Self {
        Self::Text(fragment.into())
    }

    /// An `error` payload with the `SERVER_ERROR` code.
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            code: SERVER_ERROR_CODE.to_string(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Text(_) => EventKind::Text,
            Self::ImageHint { .. } => EventKind::ImageHint,
            Self::ImageReady { .. } => EventKind::ImageReady,
            Self::Error { .. } => EventKind::Error,
            Self::Done { .. } => EventKind::Done,
        }
    }

    fn content(&self) -> Value {
        match self {
            Self::Text(fragment) => Value::String(fragment.clone()),
            Self::ImageReady {
                placeholder_id,
                url,
                ..
            } => json!({ "placeholderId": placeholder_id, "url": url }),
            Self::Error { message, code } => json!({ "message": message, "code": code }),
            Self::ImageHint { .. } | Self::Done { .. } => Value::Null,
        }
    }

    fn metadata(&self) -> Value {
        match self {
            Self::ImageHint {
                placeholder_id,
                hint,
            } => json!({ "placeholderId": placeholder_id, "hint": hint }),
            Self::ImageReady { width, height, .. } => json!({ "width": width, "height": height }),
            Self::Done { duration_ms } => json!({ "durationMs": duration_ms }),
            Self::Text(_) | Self::Error { .. } => json!({}),
        }
    }
}

/// One line of the response stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEvent {
    pub session_id: String,
    pub sequence: u64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub content: Value,
    pub metadata: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceholderFields {
    placeholder_id: String,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct Dimensions {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct ErrorFields {
    message: String,
    code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoneFields {
    duration_ms: u64,
}

impl StreamEvent {
    pub fn new(session_id: impl Into<String>, sequence: u64, payload: &EventPayload) -> Self {
        Self {
            session_id: session_id.into(),
            sequence,
            kind: payload.kind(),
            content: payload.content(),
            metadata: payload.metadata(),
        }
    }

    /// Encode as a single newline-terminated JSON line.
    pub fn to_ndjson(&self) -> Result<Bytes, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(Bytes::from(line))
    }

    /// Parse one NDJSON line (trailing newline optional).
    pub fn from_ndjson(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line.trim_ascii_end())
    }

    /// Recover the typed payload. Returns `None` when content or metadata
    /// do not have the shape their kind requires.
    pub fn payload(&self) -> Option<EventPayload> {
        match self.kind {
            EventKind::Text => self.content.as_str().map(EventPayload::text),
            EventKind::ImageHint => {
                let fields: PlaceholderFields =
                    serde_json::from_value(self.metadata.clone()).ok()?;
                Some(EventPayload::ImageHint {
                    placeholder_id: fields.placeholder_id,
                    hint: fields.hint?,
                })
            }
            EventKind::ImageReady => {
                let fields: PlaceholderFields =
                    serde_json::from_value(self.content.clone()).ok()?;
                let dims: Dimensions = serde_json::from_value(self.metadata.clone()).ok()?;
                Some(EventPayload::ImageReady {
                    placeholder_id: fields.placeholder_id,
                    url: fields.url?,
                    width: dims.width,
                    height: dims.height,
                })
            }
            EventKind::Error => {
                let fields: ErrorFields = serde_json::from_value(self.content.clone()).ok()?;
                Some(EventPayload::Error {
                    message: fields.message,
                    code: fields.code,
                })
            }
            EventKind::Done => {
                let fields: DoneFields = serde_json::from_value(self.metadata.clone()).ok()?;
                Some(EventPayload::Done {
                    duration_ms: fields.duration_ms,
                })
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}
