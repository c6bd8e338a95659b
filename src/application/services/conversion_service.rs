use std::io::Write;
use std::sync::Arc;

use crate::application::ports::{ConversionError, PdfConverter, StorageSink, WebsiteConverter};
use crate::domain::{
    ConversionInput, ConversionMethod, ConversionRequest, MarkdownArtifact, StorageKey,
    StoredAsset,
};

use super::ScratchSpace;

/// The adapter for every (input kind, method) pair.
#[derive(Clone)]
pub struct Converters {
    pub local_pdf: Arc<dyn PdfConverter>,
    pub managed_pdf: Arc<dyn PdfConverter>,
    pub local_website: Arc<dyn WebsiteConverter>,
    pub managed_website: Arc<dyn WebsiteConverter>,
}

/// Routes conversion requests to an adapter and publishes the resulting
/// Markdown to storage.
pub struct ConversionService {
    converters: Converters,
    storage: Arc<dyn StorageSink>,
    scratch: ScratchSpace,
}

impl ConversionService {
    pub fn new(converters: Converters, storage: Arc<dyn StorageSink>, scratch: ScratchSpace) -> Self {
        Self {
            converters,
            storage,
            scratch,
        }
    }

    pub fn scratch(&self) -> &ScratchSpace {
        &self.scratch
    }

    pub fn parse_method(raw: &str) -> Result<ConversionMethod, ConversionError> {
        raw.parse::<ConversionMethod>()
            .map_err(ConversionError::InvalidMethod)
    }

    /// Converts an uploaded PDF. The bytes are staged in a scratch file that
    /// is removed before returning.
    pub async fn convert_pdf(
        &self,
        data: &[u8],
        file_name: &str,
        method: &str,
    ) -> Result<StoredAsset, ConversionError> {
        let method = Self::parse_method(method)?;

        let mut staged = self.scratch.file(".pdf")?;
        staged.write_all(data)?;
        staged.flush()?;

        let request = ConversionRequest::pdf(staged.path(), file_name, method);
        self.convert(&request).await
    }

    pub async fn convert_website(
        &self,
        url: &str,
        method: &str,
    ) -> Result<StoredAsset, ConversionError> {
        let method = Self::parse_method(method)?;
        let request = ConversionRequest::website(url, method);
        self.convert(&request).await
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            conversion_id = %request.id,
            input_kind = %request.input.kind(),
            method = %request.method
        )
    )]
    pub async fn convert(&self, request: &ConversionRequest) -> Result<StoredAsset, ConversionError> {
        tracing::info!("Conversion started");

        let artifact = match (&request.input, request.method) {
            (ConversionInput::Pdf { path, file_name }, ConversionMethod::Local) => {
                self.converters
                    .local_pdf
                    .convert(path, file_name, &request.id)
                    .await
            }
            (ConversionInput::Pdf { path, file_name }, ConversionMethod::Managed) => {
                self.converters
                    .managed_pdf
                    .convert(path, file_name, &request.id)
                    .await
            }
            (ConversionInput::Website { url }, ConversionMethod::Local) => {
                self.converters.local_website.convert(url, &request.id).await
            }
            (ConversionInput::Website { url }, ConversionMethod::Managed) => {
                self.converters
                    .managed_website
                    .convert(url, &request.id)
                    .await
            }
        };

        let artifact = match artifact {
            Ok(a) => a,
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                return Err(e);
            }
        };

        let asset = self.publish(request, &artifact).await?;
        tracing::info!(url = %asset.url, bytes = artifact.len(), "Conversion complete");
        Ok(asset)
    }

    async fn publish(
        &self,
        request: &ConversionRequest,
        artifact: &MarkdownArtifact,
    ) -> Result<StoredAsset, ConversionError> {
        let mut md_file = self.scratch.file(".md")?;
        md_file.write_all(artifact.content().as_bytes())?;
        md_file.flush()?;

        let key = StorageKey::new(&request.id, &request.artifact_name());
        let result = self.storage.put(md_file.path(), &key).await;
        drop(md_file);

        result.map_err(|e| {
            tracing::error!(error = %e, key = %key, "Markdown upload failed");
            ConversionError::from(e)
        })
    }
}
