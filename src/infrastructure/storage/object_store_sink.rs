use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use tokio::io::AsyncReadExt;

use crate::application::ports::{StorageError, StorageSink};
use crate::domain::{StorageKey, StoredAsset};

/// Files at or below this size go up in a single request.
const SINGLE_PUT_LIMIT: u64 = 8 * 1024 * 1024;
const PART_SIZE: usize = 8 * 1024 * 1024;

/// Storage sink over any `object_store` backend. URLs are formed by joining
/// the object key onto `public_base_url`.
pub struct ObjectStoreSink {
    inner: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl ObjectStoreSink {
    pub fn new(inner: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            inner,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// S3 bucket; credentials come from the standard `AWS_*` variables.
    /// `public_base_url` overrides the bucket URL, e.g. for a CDN in front of it.
    pub fn s3(
        bucket: &str,
        region: &str,
        endpoint: Option<&str>,
        public_base_url: Option<&str>,
    ) -> Result<Self, StorageError> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_region(region);
        if let Some(endpoint) = endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        let store = builder
            .build()
            .map_err(|e| StorageError::Misconfigured(e.to_string()))?;

        let public_base_url = match (public_base_url, endpoint) {
            (Some(base), _) => base.to_string(),
            (None, Some(endpoint)) => format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            (None, None) => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
        };

        Ok(Self::new(Arc::new(store), public_base_url))
    }

    pub fn local(base_path: PathBuf, public_base_url: &str) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&base_path).map_err(StorageError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StorageError::Misconfigured(e.to_string()))?;
        Ok(Self::new(Arc::new(fs), public_base_url))
    }

    pub fn in_memory(public_base_url: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), public_base_url)
    }

    pub fn url_for(&self, key: &StorageKey) -> String {
        format!("{}/{}", self.public_base_url, key.as_str())
    }

    async fn put_multipart(
        &self,
        store_path: &StorePath,
        file: &mut tokio::fs::File,
    ) -> Result<(), StorageError> {
        let mut upload = self
            .inner
            .put_multipart(store_path)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        loop {
            let part = match read_part(file).await {
                Ok(Some(bytes)) => bytes,
                Ok(None) => break,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(StorageError::Io(e));
                }
            };
            if let Err(e) = upload.put_part(PutPayload::from(part)).await {
                let _ = upload.abort().await;
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl StorageSink for ObjectStoreSink {
    async fn put(&self, local_path: &Path, key: &StorageKey) -> Result<StoredAsset, StorageError> {
        let store_path = StorePath::from(key.as_str());
        let mut file = tokio::fs::File::open(local_path).await?;
        let size = file.metadata().await?.len();

        if size <= SINGLE_PUT_LIMIT {
            let mut data = Vec::with_capacity(size as usize);
            file.read_to_end(&mut data).await?;
            self.inner
                .put(&store_path, PutPayload::from(Bytes::from(data)))
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        } else {
            self.put_multipart(&store_path, &mut file).await?;
        }

        let url = self.url_for(key);
        tracing::debug!(key = %key, bytes = size, url = %url, "Object stored");
        Ok(StoredAsset::new(url, key.clone()))
    }
}

async fn read_part(file: &mut tokio::fs::File) -> std::io::Result<Option<Bytes>> {
    let mut buf = vec![0u8; PART_SIZE];
    let mut filled = 0;
    while filled < PART_SIZE {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    if filled == 0 {
        return Ok(None);
    }
    buf.truncate(filled);
    Ok(Some(Bytes::from(buf)))
}
