//! Background job runner.
//!
//! A job is spawned on the tokio runtime and handed back as a [`JobHandle`].
//! Joining consumes the handle, so a job resolves at most once. A handle that
//! is dropped unjoined aborts its task and logs it, as a warning when the job
//! was still running.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::generator::{Artifact, ArtifactGenerator, GenerationRequest, GeneratorError};
use crate::metrics::JOB_DURATION;

use super::error::JobError;

/// Starts generation jobs against one generator.
#[derive(Clone)]
pub struct JobRunner {
    generator: Arc<dyn ArtifactGenerator>,
}

impl JobRunner {
    pub fn new(generator: Arc<dyn ArtifactGenerator>) -> Self {
        Self { generator }
    }

    /// Name of the underlying generator.
    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Spawn the job and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, request: GenerationRequest) -> JobHandle {
        let generator = Arc::clone(&self.generator);
        debug!(generator = generator.name(), "Starting background job");
        let task = tokio::spawn(async move { generator.generate(request).await });

        JobHandle {
            task: Some(task),
            started: Instant::now(),
        }
    }
}

/// Handle to an in-flight job.
#[derive(Debug)]
pub struct JobHandle {
    task: Option<JoinHandle<Result<Artifact, GeneratorError>>>,
    started: Instant,
}

impl JobHandle {
    /// Whether the job has already resolved (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Wait for the job to resolve.
    ///
    /// With a deadline, a job still running when it expires is aborted and
    /// reported as [`JobError::Timeout`]. Without one, waits indefinitely.
    pub async fn join(mut self, deadline: Option<Duration>) -> Result<Artifact, JobError> {
        let Some(mut task) = self.task.take() else {
            return Err(JobError::Aborted);
        };

        let joined = match deadline {
            Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    task.abort();
                    let err = JobError::Timeout {
                        timeout_ms: limit.as_millis() as u64,
                    };
                    self.observe(err.result_label());
                    return Err(err);
                }
            },
            None => task.await,
        };

        let result = match joined {
            Ok(Ok(artifact)) => Ok(artifact),
            Ok(Err(e)) => Err(JobError::Failed(e)),
            Err(e) => Err(Self::join_error(e)),
        };

        match &result {
            Ok(_) => self.observe("success"),
            Err(e) => self.observe(e.result_label()),
        }
        result
    }

    fn join_error(e: JoinError) -> JobError {
        if e.is_panic() {
            JobError::Panicked
        } else {
            JobError::Aborted
        }
    }

    fn observe(&self, result: &str) {
        JOB_DURATION
            .with_label_values(&[result])
            .observe(self.started.elapsed().as_secs_f64());
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let elapsed_ms = self.started.elapsed().as_millis() as u64;
            if task.is_finished() {
                debug!(
                    elapsed_ms,
                    "Discarding finished background job that was never joined"
                );
            } else {
                warn!(
                    elapsed_ms,
                    "Abandoning background job that was never joined"
                );
            }
            task.abort();
        }
    }
}
