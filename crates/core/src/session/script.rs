//! Scripted steps a session executes, in order.

use std::time::Duration;

use super::error::OrchestrationFault;

/// One step of a session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Emit a `text` event.
    Text(String),
    /// Emit an `image_hint` event and remember its placeholder for the next job.
    ImageHint { placeholder_id: String, hint: String },
    /// Suspend before the next step.
    Pause(Duration),
    /// Launch the background job without waiting for it.
    StartJob,
    /// Wait for the background job and emit `image_ready`.
    AwaitJob,
}

/// Ordered list of steps. The orchestrator appends the terminal event itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The welcome-then-image conversation served by the gateway.
    pub fn image_reply(step_delay: Duration) -> Self {
        Self::new(vec![
            Step::Text("你好，欢迎使用。".to_string()),
            Step::Pause(step_delay),
            Step::Text("我正在为你生成图片提示，占位即将出现…".to_string()),
            Step::Pause(step_delay),
            Step::ImageHint {
                placeholder_id: "img-0".to_string(),
                hint: "图片正在生成…".to_string(),
            },
            Step::StartJob,
            Step::Pause(step_delay),
            Step::Text("文字继续生成中…再稍等一下。".to_string()),
            Step::AwaitJob,
        ])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Sum of all pauses.
    pub fn total_pause(&self) -> Duration {
        self.steps
            .iter()
            .filter_map(|s| match s {
                Step::Pause(d) => Some(*d),
                _ => None,
            })
            .sum()
    }

    /// Check job bookkeeping without running anything.
    ///
    /// Reports the same faults the orchestrator would hit at run time.
    pub fn validate(&self) -> Result<(), OrchestrationFault> {
        let mut has_placeholder = false;
        let mut job_in_flight = false;

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::ImageHint { .. } => has_placeholder = true,
                Step::StartJob => {
                    if job_in_flight {
                        return Err(OrchestrationFault::JobAlreadyRunning { step: index });
                    }
                    if !has_placeholder {
                        return Err(OrchestrationFault::MissingPlaceholder { step: index });
                    }
                    job_in_flight = true;
                }
                Step::AwaitJob => {
                    if !job_in_flight {
                        return Err(OrchestrationFault::NoJobStarted { step: index });
                    }
                    job_in_flight = false;
                }
                Step::Text(_) | Step::Pause(_) => {}
            }
        }

        if job_in_flight {
            return Err(OrchestrationFault::JobNeverAwaited);
        }
        Ok(())
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::image_reply(Duration::from_millis(500))
    }
}
