use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::debug;

use super::{EventSink, SinkError};
use crate::event::StreamEvent;

/// Sink that pushes encoded NDJSON lines into a bounded channel.
///
/// The receiver is typically turned into an HTTP response body. Dropping the
/// sender on close ends that body.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Option<mpsc::Sender<Bytes>>,
}

/// Create a channel sink and the receiver carrying its encoded lines.
pub fn channel_sink(capacity: usize) -> (ChannelSink, mpsc::Receiver<Bytes>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ChannelSink { tx: Some(tx) }, rx)
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn write(&mut self, event: &StreamEvent) -> Result<(), SinkError> {
        let tx = self.tx.as_ref().ok_or(SinkError::Closed)?;
        let line = event.to_ndjson()?;
        tx.send(line).await.map_err(|_| SinkError::Disconnected)
    }

    fn close(&mut self) {
        if self.tx.take().is_some() {
            debug!("Channel sink closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.tx.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventPayload;

    fn text_event(sequence: u64) -> StreamEvent {
        StreamEvent::new("s-1", sequence, &EventPayload::text("hi"))
    }

    #[tokio::test]
    async fn test_write_delivers_lines_in_order() {
        let (mut sink, mut rx) = channel_sink(8);
        for seq in 1..=3 {
            tokio_test::assert_ok!(sink.write(&text_event(seq)).await);
        }
        sink.close();

        let mut sequences = Vec::new();
        while let Some(line) = rx.recv().await {
            sequences.push(StreamEvent::from_ndjson(&line).unwrap().sequence);
        }
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_write_after_close_fails() {
        let (mut sink, _rx) = channel_sink(8);
        sink.close();
        assert!(sink.is_closed());
        let err = sink.write(&text_event(1)).await.unwrap_err();
        assert!(matches!(err, SinkError::Closed));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (mut sink, mut rx) = channel_sink(8);
        sink.close();
        sink.close();
        assert!(sink.is_closed());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_write_to_dropped_receiver_reports_disconnect() {
        let (mut sink, rx) = channel_sink(8);
        drop(rx);
        let err = sink.write(&text_event(1)).await.unwrap_err();
        assert!(matches!(err, SinkError::Disconnected));
        assert!(!sink.is_closed());
    }
}
