//! Typed stream events.
//!
//! Every event carries the owning session id and a per-session sequence
//! number; the kind decides the shape of `content` and `metadata`.

mod types;

pub use types::{EventKind, EventPayload, StreamEvent, SERVER_ERROR_CODE};
