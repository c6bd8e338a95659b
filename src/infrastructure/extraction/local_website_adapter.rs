use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::application::ports::{ConversionError, WebsiteConverter};
use crate::application::services::markdown_assembler::render_website;
use crate::domain::{ConversionId, MarkdownArtifact};

use super::html_content::extract_page;

/// Fetches a page directly and converts it in-process.
pub struct LocalWebsiteAdapter {
    client: Client,
}

impl LocalWebsiteAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &Url) -> Result<String, ConversionError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ConversionError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConversionError::fetch(
                url.as_str(),
                format!("server responded with {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ConversionError::fetch(url.as_str(), e))
    }
}

pub fn parse_page_url(raw: &str) -> Result<Url, ConversionError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConversionError::fetch(raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConversionError::fetch(
            raw,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

#[async_trait]
impl WebsiteConverter for LocalWebsiteAdapter {
    #[tracing::instrument(skip(self, conversion_id), fields(conversion_id = %conversion_id))]
    async fn convert(
        &self,
        url: &str,
        conversion_id: &ConversionId,
    ) -> Result<MarkdownArtifact, ConversionError> {
        let page_url = parse_page_url(url)?;
        let html = self.fetch(&page_url).await?;

        let document = extract_page(&html, &page_url);
        tracing::info!(
            paragraphs = document.text.len(),
            images = document.images.len(),
            links = document.links.len(),
            tables = document.tables.len(),
            "Website content extracted"
        );

        Ok(MarkdownArtifact::new(render_website(url, &document))?)
    }
}
