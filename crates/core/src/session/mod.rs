//! Streaming sessions.
//!
//! A session turns one prompt into an ordered event stream:
//! - **Foreground**: scripted text and placeholder events, paced by pauses
//! - **Background**: one generation job, overlapping the foreground steps
//! - **Termination**: exactly one `done` or `error`, always last, then close

mod error;
mod orchestrator;
mod script;
mod types;

pub use error::{OrchestrationFault, SessionError};
pub use orchestrator::SessionOrchestrator;
pub use script::{Script, Step};
pub use types::{Session, SessionState, SessionSummary, StreamParams};
