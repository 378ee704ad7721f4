//! Event sinks: the ordered output channel of a session.
//!
//! - [`EventSink`] is the abstract channel (`write` + idempotent `close`).
//! - [`ChannelSink`] feeds an mpsc channel that the transport drains.
//! - [`SinkGuard`] closes its sink on every exit path, including unwinding.

mod channel;
mod error;
mod guard;
mod traits;

pub use channel::{channel_sink, ChannelSink};
pub use error::SinkError;
pub use guard::SinkGuard;
pub use traits::EventSink;
