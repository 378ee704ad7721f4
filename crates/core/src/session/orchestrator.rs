//! Session orchestrator implementation.
//!
//! Runs a [`Script`] against one sink:
//! - Foreground: text and hint events, pauses
//! - Background: one generation job, started mid-script and joined later
//! - Termination: exactly one `done` or `error` event, then the sink is closed

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::event::{EventPayload, StreamEvent};
use crate::generator::{ArtifactGenerator, GenerationRequest};
use crate::job::{JobHandle, JobRunner};
use crate::metrics::{EVENTS_EMITTED, SESSIONS_ACTIVE, SESSIONS_TOTAL, SESSION_DURATION};
use crate::sink::{EventSink, SinkError, SinkGuard};

use super::error::{OrchestrationFault, SessionError};
use super::script::{Script, Step};
use super::types::{Session, SessionSummary, StreamParams};

/// A job in flight, tied to the placeholder it will fill.
struct PendingJob {
    placeholder_id: String,
    handle: JobHandle,
}

/// Drives streaming sessions. Built once and shared by all requests.
#[derive(Clone)]
pub struct SessionOrchestrator {
    runner: JobRunner,
    script: Arc<Script>,
    job_timeout: Option<Duration>,
}

impl SessionOrchestrator {
    /// Create a new orchestrator.
    pub fn new(generator: Arc<dyn ArtifactGenerator>, script: Script) -> Self {
        Self {
            runner: JobRunner::new(generator),
            script: Arc::new(script),
            job_timeout: None,
        }
    }

    /// Bound how long a session waits for its background job.
    pub fn with_job_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.job_timeout = timeout;
        self
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn generator_name(&self) -> &str {
        self.runner.generator_name()
    }

    /// Stream one session into `sink`.
    ///
    /// Never fails: every error becomes a terminal `error` event. The sink is
    /// closed on every exit path.
    pub async fn run<S: EventSink>(
        &self,
        prompt: &str,
        params: StreamParams,
        sink: S,
    ) -> SessionSummary {
        let mut session = Session::new();
        let mut sink = SinkGuard::new(sink);

        SESSIONS_ACTIVE.inc();
        info!(
            session_id = %session.id(),
            prompt_chars = prompt.chars().count(),
            width = params.width,
            height = params.height,
            "Session started"
        );

        match self.drive(&mut session, &mut *sink, prompt, params).await {
            Ok(()) => {
                session.complete();
                info!(
                    session_id = %session.id(),
                    events = session.sequence(),
                    "Session completed"
                );
            }
            Err(e) => {
                session.fail();
                warn!(session_id = %session.id(), error = %e, "Session failed");
                let payload = EventPayload::server_error(e.to_string());
                if let Err(sink_err) = emit(&mut session, &mut *sink, payload).await {
                    error!(
                        session_id = %session.id(),
                        error = %sink_err,
                        "Could not deliver error event"
                    );
                }
            }
        }

        sink.close();
        SESSIONS_ACTIVE.dec();

        let outcome = session.state().as_str();
        let duration_ms = session.elapsed_ms();
        SESSIONS_TOTAL.with_label_values(&[outcome]).inc();
        SESSION_DURATION
            .with_label_values(&[outcome])
            .observe(duration_ms as f64 / 1000.0);

        SessionSummary {
            session_id: session.id().to_string(),
            state: session.state(),
            events_emitted: session.sequence(),
            started_at: session.started_at(),
            duration_ms,
        }
    }

    /// Execute every step, then emit `done`. Any error aborts the remaining steps.
    async fn drive<S: EventSink>(
        &self,
        session: &mut Session,
        sink: &mut S,
        prompt: &str,
        params: StreamParams,
    ) -> Result<(), SessionError> {
        let mut placeholder: Option<String> = None;
        let mut pending: Option<PendingJob> = None;

        for (index, step) in self.script.steps().iter().enumerate() {
            match step {
                Step::Text(fragment) => {
                    emit(session, sink, EventPayload::text(fragment.as_str())).await?;
                }
                Step::ImageHint {
                    placeholder_id,
                    hint,
                } => {
                    emit(
                        session,
                        sink,
                        EventPayload::ImageHint {
                            placeholder_id: placeholder_id.clone(),
                            hint: hint.clone(),
                        },
                    )
                    .await?;
                    placeholder = Some(placeholder_id.clone());
                }
                Step::Pause(delay) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(*delay).await;
                    }
                }
                Step::StartJob => {
                    if pending.is_some() {
                        return Err(OrchestrationFault::JobAlreadyRunning { step: index }.into());
                    }
                    let placeholder_id = placeholder
                        .clone()
                        .ok_or(OrchestrationFault::MissingPlaceholder { step: index })?;
                    let handle = self.runner.start(GenerationRequest {
                        prompt: prompt.to_string(),
                        width: params.width,
                        height: params.height,
                    });
                    debug!(session_id = %session.id(), %placeholder_id, "Background job started");
                    pending = Some(PendingJob {
                        placeholder_id,
                        handle,
                    });
                }
                Step::AwaitJob => {
                    let job = pending
                        .take()
                        .ok_or(OrchestrationFault::NoJobStarted { step: index })?;
                    let artifact = job.handle.join(self.job_timeout).await?;
                    debug!(
                        session_id = %session.id(),
                        url = %artifact.url,
                        "Background job resolved"
                    );
                    emit(
                        session,
                        sink,
                        EventPayload::ImageReady {
                            placeholder_id: job.placeholder_id,
                            url: artifact.url,
                            width: artifact.width,
                            height: artifact.height,
                        },
                    )
                    .await?;
                }
            }
        }

        if pending.is_some() {
            return Err(OrchestrationFault::JobNeverAwaited.into());
        }

        let duration_ms = session.elapsed_ms();
        emit(session, sink, EventPayload::Done { duration_ms }).await?;
        Ok(())
    }
}

/// Write one event stamped with the session's next sequence number.
///
/// The counter only advances once the sink accepted the event.
async fn emit<S: EventSink + ?Sized>(
    session: &mut Session,
    sink: &mut S,
    payload: EventPayload,
) -> Result<(), SinkError> {
    let event = StreamEvent::new(session.id(), session.next_sequence(), &payload);
    sink.write(&event).await?;
    session.commit_sequence();
    EVENTS_EMITTED.with_label_values(&[event.kind.as_str()]).inc();
    debug!(
        session_id = %session.id(),
        sequence = event.sequence,
        kind = %event.kind,
        "Event emitted"
    );
    Ok(())
}
