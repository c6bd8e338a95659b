use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::application::ports::{ConversionError, JobStatusSource};
use crate::domain::{JobId, JobSnapshot};
use crate::infrastructure::observability::redact_secrets;

pub const DEFAULT_BASE_URL: &str = "https://pdf-services.adobe.io";
pub const SERVICE_NAME: &str = "Adobe PDF Services";

#[derive(Debug, Clone)]
pub struct AdobeCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// REST client for the PDF Services extract operation.
pub struct AdobePdfServicesClient {
    client: Client,
    base_url: String,
    credentials: Option<AdobeCredentials>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetResponse {
    #[serde(rename = "uploadUri")]
    pub upload_uri: String,
    #[serde(rename = "assetID")]
    pub asset_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractJobStatus {
    pub status: String,
    pub resource: Option<DownloadableAsset>,
    pub content: Option<DownloadableAsset>,
    pub error: Option<ServiceError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadableAsset {
    #[serde(rename = "downloadUri")]
    pub download_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ExtractJobStatus {
    pub fn snapshot(&self) -> JobSnapshot {
        match self.status.as_str() {
            "done" => JobSnapshot::succeeded(),
            "failed" => {
                let message = self
                    .error
                    .as_ref()
                    .and_then(|e| e.message.clone().or_else(|| e.code.clone()))
                    .unwrap_or_else(|| "No detailed error message provided.".to_string());
                JobSnapshot::failed(message)
            }
            _ => JobSnapshot::pending(),
        }
    }

    /// URI of the result archive, falling back to the JSON-only content.
    pub fn download_uri(&self) -> Option<&str> {
        self.resource
            .as_ref()
            .or(self.content.as_ref())
            .map(|a| a.download_uri.as_str())
    }
}

impl AdobePdfServicesClient {
    pub fn new(client: Client, base_url: &str, credentials: Option<AdobeCredentials>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn credentials(&self) -> Result<&AdobeCredentials, ConversionError> {
        self.credentials
            .as_ref()
            .ok_or_else(|| ConversionError::auth(SERVICE_NAME, "client credentials are not configured"))
    }

    pub async fn authenticate(&self) -> Result<String, ConversionError> {
        let credentials = self.credentials()?;
        let url = format!("{}/token", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ConversionError::auth(SERVICE_NAME, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ConversionError::auth(
                SERVICE_NAME,
                format!("token endpoint returned {status}: {}", redact_secrets(&text)),
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConversionError::auth(SERVICE_NAME, format!("invalid token response: {e}")))?;

        Ok(token.access_token)
    }

    /// Creates an input asset and uploads the PDF bytes to it.
    pub async fn upload_asset(&self, token: &str, data: Vec<u8>) -> Result<String, ConversionError> {
        let url = format!("{}/assets", self.base_url);
        let response = self
            .authorized(self.client.post(&url), token)?
            .json(&serde_json::json!({ "mediaType": "application/pdf" }))
            .send()
            .await
            .map_err(|e| ConversionError::fetch(&url, e))?;
        let response = check(response, &url).await?;

        let asset: AssetResponse = response
            .json()
            .await
            .map_err(|e| ConversionError::parse(format!("invalid asset response: {e}")))?;

        let upload = self
            .client
            .put(&asset.upload_uri)
            .header("Content-Type", "application/pdf")
            .body(data)
            .send()
            .await
            .map_err(|e| ConversionError::fetch("asset upload URI", e))?;
        check(upload, "asset upload URI").await?;

        Ok(asset.asset_id)
    }

    /// Submits the extract job. The returned id is the job's status URL.
    pub async fn submit_extract(&self, token: &str, asset_id: &str) -> Result<JobId, ConversionError> {
        let url = format!("{}/operation/extractpdf", self.base_url);
        let body = serde_json::json!({
            "assetID": asset_id,
            "elementsToExtract": ["text", "tables"],
            "renditionsToExtract": ["figures"],
            "tableOutputFormat": "xlsx",
        });

        let response = self
            .authorized(self.client.post(&url), token)?
            .json(&body)
            .send()
            .await
            .map_err(|e| ConversionError::fetch(&url, e))?;
        let response = check(response, &url).await?;

        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ConversionError::parse("extract response missing location header"))?
            .to_string();

        Ok(JobId::new(location))
    }

    pub async fn job_status(&self, token: &str, job: &JobId) -> Result<ExtractJobStatus, ConversionError> {
        let response = self
            .authorized(self.client.get(job.as_str()), token)?
            .send()
            .await
            .map_err(|e| ConversionError::fetch(job.as_str(), e))?;
        let response = check(response, job.as_str()).await?;

        response
            .json()
            .await
            .map_err(|e| ConversionError::parse(format!("invalid job status response: {e}")))
    }

    /// Downloads a result asset to `dest`.
    pub async fn download(&self, uri: &str, dest: &Path) -> Result<u64, ConversionError> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| ConversionError::fetch("result download URI", e))?;
        let response = check(response, "result download URI").await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConversionError::fetch("result download URI", e))?;
        tokio::fs::write(dest, &bytes).await?;

        Ok(bytes.len() as u64)
    }

    fn authorized(
        &self,
        request: reqwest::RequestBuilder,
        token: &str,
    ) -> Result<reqwest::RequestBuilder, ConversionError> {
        let credentials = self.credentials()?;
        Ok(request
            .header("X-API-Key", &credentials.client_id)
            .bearer_auth(token))
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

/// Status queries for one extract job under one access token. Keeps the last
/// response so the result URI is available once the job is done.
pub struct AdobeJobSource<'a> {
    client: &'a AdobePdfServicesClient,
    token: &'a str,
    last: Mutex<Option<ExtractJobStatus>>,
}

impl<'a> AdobeJobSource<'a> {
    pub fn new(client: &'a AdobePdfServicesClient, token: &'a str) -> Self {
        Self {
            client,
            token,
            last: Mutex::new(None),
        }
    }

    pub fn last_status(&self) -> Option<ExtractJobStatus> {
        self.last
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl JobStatusSource for AdobeJobSource<'_> {
    fn service_name(&self) -> &str {
        SERVICE_NAME
    }

    async fn poll(&self, job: &JobId) -> Result<JobSnapshot, ConversionError> {
        let status = self.client.job_status(self.token, job).await?;
        let snapshot = status.snapshot();
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(status);
        Ok(snapshot)
    }
}
