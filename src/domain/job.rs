use std::fmt;

use super::JobStatus;

/// Identifier a managed service hands back for a submitted job. For some
/// services this is a run id, for others the full status URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: JobId,
    pub status: JobStatus,
}

impl JobHandle {
    pub fn submitted(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Pending,
        }
    }
}

/// One observation of a job's state, as returned by a status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub message: Option<String>,
}

impl JobSnapshot {
    pub fn pending() -> Self {
        Self {
            status: JobStatus::Pending,
            message: None,
        }
    }

    pub fn succeeded() -> Self {
        Self {
            status: JobStatus::Succeeded,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            message: Some(message.into()),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Aborted,
            message: Some(message.into()),
        }
    }
}
