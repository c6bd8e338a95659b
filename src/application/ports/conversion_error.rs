use std::io;

use crate::domain::EmptyArtifact;

use super::StorageError;

/// Every failure a conversion can surface. Service-provided messages are
/// carried verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{0}")]
    InvalidMethod(String),
    #[error("failed to fetch '{url}': {reason}")]
    FetchError { url: String, reason: String },
    #[error("authentication with {service} failed: {reason}")]
    AuthError { service: String, reason: String },
    #[error("{service} job failed: {message}")]
    JobFailed { service: String, message: String },
    #[error("{service} job was aborted: {message}")]
    JobAborted { service: String, message: String },
    #[error("{service} job timed out after {secs}s")]
    TimeoutError { service: String, secs: u64 },
    #[error("empty result: {0}")]
    EmptyResult(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("scratch file error: {0}")]
    Io(#[from] io::Error),
}

impl ConversionError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchError {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn auth(service: impl Into<String>, reason: impl ToString) -> Self {
        Self::AuthError {
            service: service.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(reason: impl ToString) -> Self {
        Self::ParseError(reason.to_string())
    }

    /// True for errors caused by the caller's input rather than the pipeline.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidMethod(_))
    }
}

impl From<StorageError> for ConversionError {
    fn from(e: StorageError) -> Self {
        Self::UploadFailed(e.to_string())
    }
}

impl From<EmptyArtifact> for ConversionError {
    fn from(e: EmptyArtifact) -> Self {
        Self::EmptyResult(e.to_string())
    }
}
