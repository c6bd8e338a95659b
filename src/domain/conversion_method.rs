use std::fmt;
use std::str::FromStr;

/// Which extraction backend handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMethod {
    /// In-process extraction with open-source libraries.
    Local,
    /// A hosted extraction or crawl service.
    Managed,
}

impl ConversionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionMethod::Local => "open-source",
            ConversionMethod::Managed => "enterprise",
        }
    }
}

impl FromStr for ConversionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open-source" | "local" => Ok(ConversionMethod::Local),
            "enterprise" | "managed" => Ok(ConversionMethod::Managed),
            other => Err(format!(
                "Invalid extraction method: '{}'. Choose 'open-source' or 'enterprise'.",
                other
            )),
        }
    }
}

impl fmt::Display for ConversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
