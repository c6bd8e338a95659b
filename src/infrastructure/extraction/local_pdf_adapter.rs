use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{ConversionError, PdfConverter, StorageSink};
use crate::application::services::ScratchSpace;
use crate::application::services::markdown_assembler::render_local_pdf;
use crate::domain::{
    ConversionId, ExtractedDocument, ImageRef, MarkdownArtifact, StorageKey, Table, TextSegment,
};

use super::pdf_images::{PageImage, extract_page_images};
use super::pdf_tables::detect_tables;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(120);

/// Converts PDFs in-process: page text through `pdf_oxide`, embedded images
/// through `lopdf`. Images are published one by one as they are found.
pub struct LocalPdfAdapter {
    storage: Arc<dyn StorageSink>,
    scratch: ScratchSpace,
}

struct PageContent {
    page_number: u32,
    text: String,
}

struct PdfContent {
    pages: Vec<PageContent>,
    images: Vec<PageImage>,
}

impl LocalPdfAdapter {
    pub fn new(storage: Arc<dyn StorageSink>, scratch: ScratchSpace) -> Self {
        Self { storage, scratch }
    }

    fn read_pdf(path: &Path) -> Result<PdfContent, ConversionError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| ConversionError::parse(format!("failed to parse PDF: {e}")))?;

        let page_count = doc
            .page_count()
            .map_err(|e| ConversionError::parse(format!("failed to read page count: {e}")))?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            let text = match doc.extract_text(page_index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Page text extraction failed");
                    String::new()
                }
            };
            pages.push(PageContent {
                page_number: (page_index + 1) as u32,
                text,
            });
        }

        let images = extract_page_images(path)
            .map_err(|e| ConversionError::parse(format!("failed to read PDF images: {e}")))?;

        Ok(PdfContent { pages, images })
    }

    /// Writes one image to scratch, uploads it, and removes the scratch copy.
    /// Returns `None` when any step fails.
    async fn publish_image(&self, image: &PageImage, conversion_id: &ConversionId) -> Option<String> {
        let name = format!("page{}-image{}.{}", image.page, image.index, image.extension);

        let staged = self
            .scratch
            .file(&format!(".{}", image.extension))
            .and_then(|mut file| {
                file.write_all(&image.bytes)?;
                file.flush()?;
                Ok(file)
            });
        let staged = match staged {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(image = %name, error = %e, "Could not stage image; skipping");
                return None;
            }
        };

        let key = StorageKey::new(conversion_id, &name);
        let result = self.storage.put(staged.path(), &key).await;
        drop(staged);

        match result {
            Ok(asset) => Some(asset.url),
            Err(e) => {
                tracing::warn!(image = %name, error = %e, "Image upload failed; skipping");
                None
            }
        }
    }
}

#[async_trait]
impl PdfConverter for LocalPdfAdapter {
    #[tracing::instrument(skip(self, pdf_path, conversion_id), fields(conversion_id = %conversion_id))]
    async fn convert(
        &self,
        pdf_path: &Path,
        file_name: &str,
        conversion_id: &ConversionId,
    ) -> Result<MarkdownArtifact, ConversionError> {
        let path: PathBuf = pdf_path.to_path_buf();

        let content = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pdf(&path)),
        )
        .await
        .map_err(|_| ConversionError::TimeoutError {
            service: "local PDF extraction".to_string(),
            secs: EXTRACTION_TIMEOUT.as_secs(),
        })?
        .map_err(|e| ConversionError::parse(format!("task join error: {e}")))??;

        let mut document = ExtractedDocument::new(file_name);

        for image in &content.images {
            if let Some(url) = self.publish_image(image, conversion_id).await {
                document
                    .images
                    .push(ImageRef::on_page(url, image.page, image.index));
            }
        }

        for page in content.pages {
            for rows in detect_tables(&page.text) {
                document
                    .tables
                    .push(Table::from_rows(rows).on_page(page.page_number));
            }
            document
                .text
                .push(TextSegment::on_page(page.page_number, page.text));
        }

        tracing::info!(
            pages = document.text.len(),
            images_found = content.images.len(),
            images_uploaded = document.images.len(),
            tables = document.tables.len(),
            "PDF extraction complete"
        );

        Ok(MarkdownArtifact::new(render_local_pdf(&document))?)
    }
}
