use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("docmark/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for page fetches and managed-service calls.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}
