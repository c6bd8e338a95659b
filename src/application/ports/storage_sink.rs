use std::io;
use std::path::Path;

use crate::domain::{StorageKey, StoredAsset};

/// Durable object storage that hands back retrievable URLs.
#[async_trait::async_trait]
pub trait StorageSink: Send + Sync {
    /// Uploads the file at `local_path` under `key`.
    async fn put(&self, local_path: &Path, key: &StorageKey) -> Result<StoredAsset, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("storage misconfigured: {0}")]
    Misconfigured(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
