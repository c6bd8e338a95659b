use async_trait::async_trait;

use crate::domain::{JobId, JobSnapshot};

use super::ConversionError;

/// One status query against a managed service.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    /// Name used in logs and error messages.
    fn service_name(&self) -> &str;

    async fn poll(&self, job: &JobId) -> Result<JobSnapshot, ConversionError>;
}
