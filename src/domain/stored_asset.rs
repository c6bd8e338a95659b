use super::StorageKey;

/// A persisted artifact and the URL it can be retrieved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub url: String,
    pub key: StorageKey,
}

impl StoredAsset {
    pub fn new(url: impl Into<String>, key: StorageKey) -> Self {
        Self {
            url: url.into(),
            key,
        }
    }
}
