use std::sync::Arc;

use crate::application::ports::{Clock, StorageSink};
use crate::application::services::{Converters, JobPoller, ScratchSpace};
use crate::infrastructure::http_client::{DEFAULT_REQUEST_TIMEOUT, build_http_client};
use crate::presentation::config::Settings;

use super::adobe_client::{AdobeCredentials, AdobePdfServicesClient};
use super::apify_client::ApifyClient;
use super::local_pdf_adapter::LocalPdfAdapter;
use super::local_website_adapter::LocalWebsiteAdapter;
use super::managed_pdf_adapter::ManagedPdfAdapter;
use super::managed_website_adapter::ManagedWebsiteAdapter;

#[derive(Debug, thiserror::Error)]
pub enum ExtractorFactoryError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Builds every converter once. Managed backends without credentials are
    /// still built and report an authentication error when used.
    pub fn create(
        settings: &Settings,
        storage: Arc<dyn StorageSink>,
        scratch: ScratchSpace,
        clock: Arc<dyn Clock>,
    ) -> Result<Converters, ExtractorFactoryError> {
        let http = build_http_client(DEFAULT_REQUEST_TIMEOUT)?;
        let poller = Arc::new(JobPoller::new(clock, settings.polling.policy()));

        let credentials = match (&settings.adobe.client_id, &settings.adobe.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some(AdobeCredentials {
                    client_id: id.clone(),
                    client_secret: secret.clone(),
                })
            }
            _ => {
                tracing::warn!("PDF Services credentials missing; enterprise PDF conversion will fail");
                None
            }
        };
        tracing::info!(base_url = %settings.adobe.base_url, "Loading managed PDF adapter");
        let adobe = Arc::new(AdobePdfServicesClient::new(
            http.clone(),
            &settings.adobe.base_url,
            credentials,
        ));

        if settings.apify.token.as_deref().is_none_or(str::is_empty) {
            tracing::warn!("Apify token missing; enterprise website conversion will fail");
        }
        tracing::info!(
            base_url = %settings.apify.base_url,
            actor_id = %settings.apify.actor_id,
            "Loading managed website adapter"
        );
        let apify = Arc::new(ApifyClient::new(
            http.clone(),
            &settings.apify.base_url,
            settings.apify.token.clone(),
            &settings.apify.actor_id,
        ));

        Ok(Converters {
            local_pdf: Arc::new(LocalPdfAdapter::new(storage.clone(), scratch.clone())),
            managed_pdf: Arc::new(ManagedPdfAdapter::new(
                adobe,
                poller.clone(),
                storage,
                scratch,
            )),
            local_website: Arc::new(LocalWebsiteAdapter::new(http)),
            managed_website: Arc::new(ManagedWebsiteAdapter::new(apify, poller)),
        })
    }
}
