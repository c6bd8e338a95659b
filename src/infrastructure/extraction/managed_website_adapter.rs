use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{ConversionError, WebsiteConverter};
use crate::application::services::JobPoller;
use crate::application::services::markdown_assembler::{NO_CONTENT_FALLBACK, render_crawl_items};
use crate::domain::{ConversionId, CrawledPage, JobHandle, JobId, MarkdownArtifact};

use super::apify_client::{ApifyClient, CrawlInput};
use super::local_website_adapter::parse_page_url;

/// Crawls a site through a managed scraping actor.
pub struct ManagedWebsiteAdapter {
    client: Arc<ApifyClient>,
    poller: Arc<JobPoller>,
}

impl ManagedWebsiteAdapter {
    pub fn new(client: Arc<ApifyClient>, poller: Arc<JobPoller>) -> Self {
        Self { client, poller }
    }
}

/// Reads one dataset item. Missing fields fall back to placeholders so a
/// partial item still renders.
pub fn crawled_page(item: &Value) -> CrawledPage {
    let field = |name: &str| {
        item.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    CrawledPage {
        title: field("title").unwrap_or("No Title").to_string(),
        url: field("url").unwrap_or("#").to_string(),
        body: field("markdown")
            .or_else(|| field("text"))
            .or_else(|| field("textContent"))
            .unwrap_or(NO_CONTENT_FALLBACK)
            .to_string(),
    }
}

#[async_trait]
impl WebsiteConverter for ManagedWebsiteAdapter {
    #[tracing::instrument(skip(self, conversion_id), fields(conversion_id = %conversion_id))]
    async fn convert(
        &self,
        url: &str,
        conversion_id: &ConversionId,
    ) -> Result<MarkdownArtifact, ConversionError> {
        parse_page_url(url)?;

        let run = self.client.start_run(&CrawlInput::for_url(url)).await?;
        tracing::info!(run_id = %run.id, "Crawl run started");

        let mut job = JobHandle::submitted(JobId::new(run.id.clone()));
        let outcome = self.poller.wait(self.client.as_ref(), &mut job).await?;
        tracing::info!(attempts = outcome.attempts, "Crawl run finished");

        let dataset_id = match run.default_dataset_id {
            Some(id) => id,
            None => self
                .client
                .run_info(&run.id)
                .await?
                .default_dataset_id
                .ok_or_else(|| ConversionError::parse("run has no default dataset"))?,
        };

        let items = self.client.dataset_items(&dataset_id).await?;
        if items.is_empty() {
            return Err(ConversionError::EmptyResult(
                "crawl returned no dataset items".to_string(),
            ));
        }

        let pages: Vec<CrawledPage> = items.iter().map(crawled_page).collect();
        tracing::info!(pages = pages.len(), "Crawl items collected");

        Ok(MarkdownArtifact::new(render_crawl_items(url, &pages))?)
    }
}
