mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AdobeSettings, ApifySettings, LoggingSettings, PollingSettings, ScratchSettings,
    ServerSettings, Settings, SettingsError, StorageProviderSetting, StorageSettings,
};
