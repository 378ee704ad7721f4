//! Trait definitions for the sink module.

use async_trait::async_trait;

use super::error::SinkError;
use crate::event::StreamEvent;

/// Ordered, append-only output channel for one session.
///
/// A sink has exactly one writer. Writes are delivered in call order.
#[async_trait]
pub trait EventSink: Send {
    /// Encodes the event and appends it to the channel.
    ///
    /// Fails with [`SinkError::Closed`] after [`close`](Self::close).
    async fn write(&mut self, event: &StreamEvent) -> Result<(), SinkError>;

    /// Terminates the channel. Calling it again is a no-op.
    fn close(&mut self);

    /// Whether [`close`](Self::close) has been called.
    fn is_closed(&self) -> bool;
}

