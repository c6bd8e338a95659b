use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::PollPolicy;

use super::Environment;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub adobe: AdobeSettings,
    pub apify: ApifySettings,
    pub polling: PollingSettings,
    #[serde(default)]
    pub scratch: ScratchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub local_path: String,
    pub public_base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    S3,
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdobeSettings {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApifySettings {
    pub base_url: String,
    pub token: Option<String>,
    pub actor_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    pub interval_secs: u64,
    /// Zero disables the deadline.
    pub timeout_secs: u64,
}

impl PollingSettings {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_secs(self.interval_secs),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScratchSettings {
    /// Falls back to the system temp directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

/// Plain variable names honoured on top of `APP__`-prefixed ones.
const LEGACY_OVERRIDES: [(&str, &str); 6] = [
    ("storage.bucket", "S3_BUCKET_NAME"),
    ("storage.region", "AWS_DEFAULT_REGION"),
    ("adobe.client_id", "PDF_SERVICES_CLIENT_ID"),
    ("adobe.client_secret", "PDF_SERVICES_CLIENT_SECRET"),
    ("apify.token", "APIFY_API_TOKEN"),
    ("server.port", "SERVER_PORT"),
];

impl Settings {
    /// Loads `.env`, then `appsettings.<env>.toml` if present, then environment
    /// variables.
    pub fn load() -> Result<(Self, Environment), SettingsError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env().map_err(SettingsError::InvalidEnvironment)?;
        let settings = Self::load_for(environment, "appsettings")?;
        Ok((settings, environment))
    }

    pub fn load_for(environment: Environment, file_stem: &str) -> Result<Self, SettingsError> {
        let mut builder = Self::defaults(Config::builder())?
            .add_source(
                File::with_name(&format!("{file_stem}.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            );

        for (key, variable) in LEGACY_OVERRIDES {
            let value = std::env::var(variable).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_mb", 50)?
            .set_default("storage.provider", "s3")?
            .set_default("storage.region", "us-east-1")?
            .set_default("storage.local_path", "./data/artifacts")?
            .set_default("adobe.base_url", "https://pdf-services.adobe.io")?
            .set_default("apify.base_url", "https://api.apify.com")?
            .set_default("apify.actor_id", "OutlPf9SFs5BPflRj")?
            .set_default("polling.interval_secs", 5)?
            .set_default("polling.timeout_secs", 600)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }
}
