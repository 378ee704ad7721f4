//! Types for streaming sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::StreamConfig;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Running,
    Completed,
    Failed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// One streaming interaction. Owned by a single orchestrator run.
#[derive(Debug)]
pub struct Session {
    id: String,
    sequence: u64,
    state: SessionState,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sequence: 0,
            state: SessionState::Running,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sequence number of the last delivered event (0 before the first).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Sequence number the next delivered event will carry.
    pub fn next_sequence(&self) -> u64 {
        self.sequence + 1
    }

    /// Record that the event carrying `next_sequence()` was delivered.
    pub(crate) fn commit_sequence(&mut self) {
        self.sequence += 1;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn complete(&mut self) {
        self.state = SessionState::Completed;
    }

    pub(crate) fn fail(&mut self) {
        self.state = SessionState::Failed;
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-request generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamParams {
    pub width: u32,
    pub height: u32,
}

impl Default for StreamParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

impl From<&StreamConfig> for StreamParams {
    fn from(config: &StreamConfig) -> Self {
        Self {
            width: config.default_width,
            height: config.default_height,
        }
    }
}

/// What a finished run reports back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub state: SessionState,
    /// Number of events delivered to the sink.
    pub events_emitted: u64,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}
