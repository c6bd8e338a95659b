use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{Clock, ConversionError, JobStatusSource};
use crate::domain::{JobHandle, JobSnapshot, JobStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(600);

const NO_DETAIL: &str = "No detailed error message provided.";

/// Cadence and deadline shared by every managed-service wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: Some(DEFAULT_POLL_TIMEOUT),
        }
    }
}

/// States of a managed job as seen by the poller.
///
/// `Submitted -> Polling -> {Succeeded, Failed, Aborted, TimedOut}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    Submitted,
    Polling { attempts: u32 },
    Succeeded { attempts: u32 },
    Failed { message: String },
    Aborted { message: String },
    TimedOut { elapsed: Duration },
}

impl PollPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollPhase::Submitted | PollPhase::Polling { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub attempts: u32,
    pub elapsed: Duration,
}

pub struct JobPoller {
    clock: Arc<dyn Clock>,
    policy: PollPolicy,
}

impl JobPoller {
    pub fn new(clock: Arc<dyn Clock>, policy: PollPolicy) -> Self {
        Self { clock, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Phase reached after the `attempts`-th status query returned `snapshot`
    /// with `elapsed` time since submission.
    pub fn transition(&self, attempts: u32, snapshot: JobSnapshot, elapsed: Duration) -> PollPhase {
        match snapshot.status {
            JobStatus::Succeeded => PollPhase::Succeeded { attempts },
            JobStatus::Failed => PollPhase::Failed {
                message: snapshot.message.unwrap_or_else(|| NO_DETAIL.to_string()),
            },
            JobStatus::Aborted => PollPhase::Aborted {
                message: snapshot.message.unwrap_or_else(|| NO_DETAIL.to_string()),
            },
            JobStatus::Pending => match self.policy.timeout {
                Some(limit) if elapsed > limit => PollPhase::TimedOut { elapsed },
                _ => PollPhase::Polling { attempts },
            },
        }
    }

    /// Polls `job` until it reaches a terminal state, recording each observed
    /// status on the handle. Never polls again once a terminal status has been
    /// observed.
    pub async fn wait(
        &self,
        source: &dyn JobStatusSource,
        job: &mut JobHandle,
    ) -> Result<PollOutcome, ConversionError> {
        let service = source.service_name().to_string();
        let started = self.clock.now();
        let mut phase = PollPhase::Submitted;

        loop {
            tracing::debug!(service = %service, job_id = %job.id, phase = ?phase, "Job poll state");

            phase = match phase {
                PollPhase::Submitted => PollPhase::Polling { attempts: 0 },
                PollPhase::Polling { attempts } => {
                    let snapshot = source.poll(&job.id).await?;
                    job.status = snapshot.status;
                    let attempts = attempts + 1;
                    let elapsed = self.clock.now().saturating_duration_since(started);
                    tracing::info!(
                        service = %service,
                        job_id = %job.id,
                        status = %snapshot.status,
                        attempts,
                        "Job status"
                    );

                    let next = self.transition(attempts, snapshot, elapsed);
                    if !next.is_terminal() {
                        self.clock.sleep(self.policy.interval).await;
                    }
                    next
                }
                PollPhase::Succeeded { attempts } => {
                    let elapsed = self.clock.now().saturating_duration_since(started);
                    return Ok(PollOutcome { attempts, elapsed });
                }
                PollPhase::Failed { message } => {
                    tracing::error!(service = %service, job_id = %job.id, error = %message, "Job failed");
                    return Err(ConversionError::JobFailed { service, message });
                }
                PollPhase::Aborted { message } => {
                    tracing::error!(service = %service, job_id = %job.id, error = %message, "Job aborted");
                    return Err(ConversionError::JobAborted { service, message });
                }
                PollPhase::TimedOut { elapsed } => {
                    tracing::error!(
                        service = %service,
                        job_id = %job.id,
                        elapsed_secs = elapsed.as_secs(),
                        "Job timed out"
                    );
                    return Err(ConversionError::TimeoutError {
                        service,
                        secs: self.policy.timeout.unwrap_or(elapsed).as_secs(),
                    });
                }
            };
        }
    }
}
