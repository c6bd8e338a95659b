use std::fmt;

use super::ConversionId;

/// Object key under which an artifact is stored: `<conversion id>/<file name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(conversion_id: &ConversionId, file_name: &str) -> Self {
        Self(format!("{}/{}", conversion_id.as_uuid(), file_name))
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
