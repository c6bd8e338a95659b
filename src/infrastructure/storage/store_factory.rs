use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{StorageError, StorageSink};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_store_sink::ObjectStoreSink;

pub struct StorageSinkFactory;

impl StorageSinkFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn StorageSink>, StorageError> {
        match settings.provider {
            StorageProviderSetting::S3 => {
                let bucket = settings
                    .bucket
                    .as_deref()
                    .filter(|b| !b.is_empty())
                    .ok_or_else(|| StorageError::Misconfigured("bucket required".into()))?;
                let region = settings
                    .region
                    .as_deref()
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| StorageError::Misconfigured("region required".into()))?;
                tracing::info!(bucket, region, "Using S3 storage sink");
                let public_base_url = settings
                    .public_base_url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty());
                let sink = ObjectStoreSink::s3(
                    bucket,
                    region,
                    settings.endpoint.as_deref(),
                    public_base_url,
                )?;
                Ok(Arc::new(sink))
            }
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let base_url = settings
                    .public_base_url
                    .clone()
                    .unwrap_or_else(|| format!("file://{}", path.display()));
                tracing::info!(path = %path.display(), "Using local storage sink");
                Ok(Arc::new(ObjectStoreSink::local(path, &base_url)?))
            }
            StorageProviderSetting::Memory => {
                let base_url = settings
                    .public_base_url
                    .clone()
                    .unwrap_or_else(|| "memory://docmark".to_string());
                tracing::warn!("Using in-memory storage sink; artifacts are lost on restart");
                Ok(Arc::new(ObjectStoreSink::in_memory(&base_url)))
            }
        }
    }
}
