//! In-memory sink that records everything written to it.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::event::{EventKind, StreamEvent};
use crate::sink::{EventSink, SinkError};

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<StreamEvent>,
    lines: Vec<String>,
    attempts: usize,
    closed: bool,
    close_calls: usize,
    effective_closes: usize,
}

/// Mock implementation of the EventSink trait.
///
/// Clones share state, so a test can hand one clone to the orchestrator and
/// inspect another afterwards. Failure injection:
/// - [`reject_write`](Self::reject_write): one specific write attempt fails
/// - [`break_after`](Self::break_after): every attempt after the first `n` fails
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<RecordingState>>,
    reject_attempt: Option<usize>,
    break_after: Option<usize>,
}

impl RecordingSink {
    /// Create a new sink that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `attempt`-th write (1-based) with a transport error.
    pub fn reject_write(mut self, attempt: usize) -> Self {
        self.reject_attempt = Some(attempt);
        self
    }

    /// Accept `n` writes, then report a disconnected client for every later one.
    pub fn break_after(mut self, n: usize) -> Self {
        self.break_after = Some(n);
        self
    }

    /// Events that were accepted, in write order.
    pub fn events(&self) -> Vec<StreamEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Encoded lines that were accepted, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.state.lock().unwrap().lines.clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(|e| e.kind).collect()
    }

    pub fn sequences(&self) -> Vec<u64> {
        self.events().iter().map(|e| e.sequence).collect()
    }

    /// Number of times `close` was called.
    pub fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }

    /// Number of times `close` actually transitioned the sink to closed.
    pub fn effective_closes(&self) -> usize {
        self.state.lock().unwrap().effective_closes
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn write(&mut self, event: &StreamEvent) -> Result<(), SinkError> {
        let line = event.to_ndjson()?;
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(SinkError::Closed);
        }

        state.attempts += 1;
        if self.reject_attempt == Some(state.attempts) {
            return Err(SinkError::Rejected(format!(
                "write {} rejected",
                state.attempts
            )));
        }
        if self.break_after.is_some_and(|n| state.attempts > n) {
            return Err(SinkError::Disconnected);
        }

        state.events.push(event.clone());
        state
            .lines
            .push(String::from_utf8_lossy(&line).into_owned());
        Ok(())
    }

    fn close(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.close_calls += 1;
        if !state.closed {
            state.closed = true;
            state.effective_closes += 1;
        }
    }

    fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}
