use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ConversionError, JobStatusSource};
use crate::domain::{JobId, JobSnapshot};
use crate::infrastructure::observability::redact_secrets;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com";
pub const DEFAULT_ACTOR_ID: &str = "OutlPf9SFs5BPflRj";
pub const SERVICE_NAME: &str = "Apify";

/// Actor input for a shallow same-domain crawl.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlInput {
    pub start_urls: Vec<String>,
    pub max_depth: u32,
    pub same_domain: bool,
    pub max_results: u32,
    pub wait_for_load: u64,
}

impl CrawlInput {
    pub fn for_url(url: &str) -> Self {
        Self {
            start_urls: vec![url.to_string()],
            max_depth: 1,
            same_domain: true,
            max_results: 10,
            wait_for_load: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRun {
    pub id: String,
    pub status: String,
    pub default_dataset_id: Option<String>,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunEnvelope {
    data: ActorRun,
}

impl ActorRun {
    pub fn snapshot(&self) -> JobSnapshot {
        let message = || {
            self.status_message
                .clone()
                .or_else(|| self.error_message.clone())
                .unwrap_or_else(|| "No detailed error message provided.".to_string())
        };

        match self.status.as_str() {
            "SUCCEEDED" => JobSnapshot::succeeded(),
            "FAILED" | "TIMED-OUT" => JobSnapshot::failed(message()),
            "ABORTED" => JobSnapshot::aborted(message()),
            _ => JobSnapshot::pending(),
        }
    }
}

/// REST client for actor runs and their datasets.
pub struct ApifyClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    actor_id: String,
}

impl ApifyClient {
    pub fn new(client: Client, base_url: &str, token: Option<String>, actor_id: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            actor_id: actor_id.to_string(),
        }
    }

    fn token(&self) -> Result<&str, ConversionError> {
        self.token
            .as_deref()
            .ok_or_else(|| ConversionError::auth(SERVICE_NAME, "API token is not configured"))
    }

    pub async fn start_run(&self, input: &CrawlInput) -> Result<ActorRun, ConversionError> {
        let token = self.token()?;
        let url = format!("{}/v2/acts/{}/runs", self.base_url, self.actor_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(input)
            .send()
            .await
            .map_err(|e| ConversionError::fetch(&url, e))?;
        let response = check(response, &url).await?;

        let envelope: RunEnvelope = response
            .json()
            .await
            .map_err(|e| ConversionError::parse(format!("invalid run response: {e}")))?;
        Ok(envelope.data)
    }

    pub async fn run_info(&self, run_id: &str) -> Result<ActorRun, ConversionError> {
        let token = self.token()?;
        let url = format!("{}/v2/actor-runs/{}", self.base_url, run_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ConversionError::fetch(&url, e))?;
        let response = check(response, &url).await?;

        let envelope: RunEnvelope = response
            .json()
            .await
            .map_err(|e| ConversionError::parse(format!("invalid run response: {e}")))?;
        Ok(envelope.data)
    }

    pub async fn dataset_items(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<serde_json::Value>, ConversionError> {
        let token = self.token()?;
        let url = format!("{}/v2/datasets/{}/items", self.base_url, dataset_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("clean", "true"), ("format", "json")])
            .send()
            .await
            .map_err(|e| ConversionError::fetch(&url, e))?;
        let response = check(response, &url).await?;

        response
            .json()
            .await
            .map_err(|e| ConversionError::parse(format!("invalid dataset response: {e}")))
    }
}

#[async_trait]
impl JobStatusSource for ApifyClient {
    fn service_name(&self) -> &str {
        SERVICE_NAME
    }

    async fn poll(&self, job: &JobId) -> Result<JobSnapshot, ConversionError> {
        Ok(self.run_info(job.as_str()).await?.snapshot())
    }
}

async fn check(response: Response, target: &str) -> Result<Response, ConversionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let detail = format!("{status}: {}", redact_secrets(&text));
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ConversionError::auth(SERVICE_NAME, detail));
    }
    Err(ConversionError::fetch(target, detail))
}
