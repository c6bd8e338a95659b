use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ConversionError, PdfConverter, StorageSink};
use crate::application::services::markdown_assembler::render_managed_pdf;
use crate::application::services::{JobPoller, ScratchSpace};
use crate::domain::{
    ConversionId, ExtractedDocument, ImageRef, JobHandle, MarkdownArtifact, StorageKey,
};

use super::adobe_client::{AdobeJobSource, AdobePdfServicesClient};
use super::extract_archive::read_archive;

/// Converts PDFs through the managed extraction service.
pub struct ManagedPdfAdapter {
    client: Arc<AdobePdfServicesClient>,
    poller: Arc<JobPoller>,
    storage: Arc<dyn StorageSink>,
    scratch: ScratchSpace,
}

impl ManagedPdfAdapter {
    pub fn new(
        client: Arc<AdobePdfServicesClient>,
        poller: Arc<JobPoller>,
        storage: Arc<dyn StorageSink>,
        scratch: ScratchSpace,
    ) -> Self {
        Self {
            client,
            poller,
            storage,
            scratch,
        }
    }

    /// Uploads every figure and removes each local copy. Upload failures are
    /// logged and skipped.
    async fn publish_figures(
        &self,
        figures: &[std::path::PathBuf],
        conversion_id: &ConversionId,
    ) -> Vec<ImageRef> {
        let mut images = Vec::new();

        for path in figures {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("figure{}", images.len() + 1));
            let key = StorageKey::new(conversion_id, &format!("figures/{name}"));

            match self.storage.put(path, &key).await {
                Ok(asset) => {
                    tracing::debug!(figure = %name, url = %asset.url, "Figure uploaded");
                    images.push(ImageRef::new(asset.url, images.len() + 1));
                }
                Err(e) => tracing::warn!(figure = %name, error = %e, "Figure upload failed; skipping"),
            }

            if let Err(e) = tokio::fs::remove_file(path).await {
                tracing::warn!(figure = %name, error = %e, "Could not delete local figure");
            }
        }

        tracing::info!(uploaded = images.len(), total = figures.len(), "Figures published");
        images
    }
}

#[async_trait]
impl PdfConverter for ManagedPdfAdapter {
    #[tracing::instrument(skip(self, pdf_path, conversion_id), fields(conversion_id = %conversion_id))]
    async fn convert(
        &self,
        pdf_path: &Path,
        file_name: &str,
        conversion_id: &ConversionId,
    ) -> Result<MarkdownArtifact, ConversionError> {
        let token = self.client.authenticate().await?;

        let data = tokio::fs::read(pdf_path).await?;
        let asset_id = self.client.upload_asset(&token, data).await?;
        let mut job = JobHandle::submitted(self.client.submit_extract(&token, &asset_id).await?);
        tracing::info!(asset_id = %asset_id, "Extract job submitted");

        let source = AdobeJobSource::new(&self.client, &token);
        let outcome = self.poller.wait(&source, &mut job).await?;
        tracing::info!(attempts = outcome.attempts, "Extract job finished");

        let status = source
            .last_status()
            .ok_or_else(|| ConversionError::parse("no job status recorded"))?;
        let download_uri = status
            .download_uri()
            .ok_or_else(|| ConversionError::parse("job result has no download URI"))?
            .to_string();

        // Removed on drop, whichever way this function exits.
        let workdir = self.scratch.dir()?;
        let zip_path = workdir.path().join("result.zip");
        let unpack_dir = workdir.path().join("extracted");

        let bytes = self.client.download(&download_uri, &zip_path).await?;
        tracing::debug!(bytes, "Result archive downloaded");

        let contents = tokio::task::spawn_blocking(move || read_archive(&zip_path, &unpack_dir))
            .await
            .map_err(|e| ConversionError::parse(format!("task join error: {e}")))??;

        let images = self.publish_figures(&contents.figures, conversion_id).await;

        let mut document = ExtractedDocument::new(file_name);
        document.text = contents.text;
        document.tables = contents.tables;
        document.images = images;

        // A title-only document is not published.
        if document.text.is_empty() && document.tables.is_empty() && document.images.is_empty() {
            return Err(ConversionError::EmptyResult(
                "result archive has no text, tables or figures; refusing to publish a title-only document"
                    .to_string(),
            ));
        }

        Ok(MarkdownArtifact::new(render_managed_pdf(&document))?)
    }
}
