//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the generator and sink
//! traits, allowing sessions to be exercised without a network or an HTTP
//! server.
//!
//! # Example
//!
//! ```rust,ignore
//! use chatstream_core::testing::{fixtures, MockGenerator, RecordingSink};
//!
//! let generator = Arc::new(MockGenerator::new());
//! let orchestrator = fixtures::instant_orchestrator(generator.clone());
//! let sink = RecordingSink::new();
//!
//! orchestrator.run("hello", StreamParams::default(), sink.clone()).await;
//! fixtures::assert_well_formed(&sink.events());
//! ```

mod mock_generator;
mod recording_sink;

pub use mock_generator::MockGenerator;
pub use recording_sink::RecordingSink;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::event::StreamEvent;
    use crate::generator::ArtifactGenerator;
    use crate::session::{Script, SessionOrchestrator};

    /// Orchestrator running the standard script with no pauses.
    pub fn instant_orchestrator(generator: Arc<dyn ArtifactGenerator>) -> SessionOrchestrator {
        SessionOrchestrator::new(generator, Script::image_reply(Duration::ZERO))
    }

    /// Panics unless the stream satisfies the session invariants:
    /// one session id, sequences `1..=N`, exactly one terminal event, last.
    pub fn assert_well_formed(events: &[StreamEvent]) {
        assert!(!events.is_empty(), "stream is empty");

        let session_id = &events[0].session_id;
        for (index, event) in events.iter().enumerate() {
            assert_eq!(
                &event.session_id, session_id,
                "event {} belongs to another session",
                index
            );
            assert_eq!(
                event.sequence,
                index as u64 + 1,
                "sequence gap or reorder at position {}",
                index
            );
        }

        let terminals = events.iter().filter(|e| e.is_terminal()).count();
        assert_eq!(terminals, 1, "expected exactly one terminal event");
        assert!(
            events.last().is_some_and(|e| e.is_terminal()),
            "terminal event is not last"
        );
    }
}
