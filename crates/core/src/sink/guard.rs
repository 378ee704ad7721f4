use std::ops::{Deref, DerefMut};

use super::EventSink;

/// Owns a sink and closes it when dropped.
///
/// Closing explicitly through the guard is allowed; the drop-time close is
/// then absorbed by the sink's idempotent `close`.
pub struct SinkGuard<S: EventSink> {
    sink: S,
}

impl<S: EventSink> SinkGuard<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: EventSink> Deref for SinkGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.sink
    }
}

impl<S: EventSink> DerefMut for SinkGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: EventSink> Drop for SinkGuard<S> {
    fn drop(&mut self) {
        self.sink.close();
    }
}
