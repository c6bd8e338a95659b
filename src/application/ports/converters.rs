use std::path::Path;

use async_trait::async_trait;

use crate::domain::{ConversionId, MarkdownArtifact};

use super::ConversionError;

/// Turns a PDF on local disk into Markdown.
#[async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(
        &self,
        pdf_path: &Path,
        file_name: &str,
        conversion_id: &ConversionId,
    ) -> Result<MarkdownArtifact, ConversionError>;
}

/// Turns a web page into Markdown.
#[async_trait]
pub trait WebsiteConverter: Send + Sync {
    async fn convert(
        &self,
        url: &str,
        conversion_id: &ConversionId,
    ) -> Result<MarkdownArtifact, ConversionError>;
}
