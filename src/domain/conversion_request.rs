use std::fmt;
use std::path::PathBuf;

use super::{ConversionId, ConversionMethod};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionInput {
    /// A PDF already written to a local scratch file.
    Pdf { path: PathBuf, file_name: String },
    Website { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Pdf,
    Website,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Pdf => "pdf",
            InputKind::Website => "website",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConversionInput {
    pub fn kind(&self) -> InputKind {
        match self {
            ConversionInput::Pdf { .. } => InputKind::Pdf,
            ConversionInput::Website { .. } => InputKind::Website,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub id: ConversionId,
    pub input: ConversionInput,
    pub method: ConversionMethod,
}

impl ConversionRequest {
    pub fn new(input: ConversionInput, method: ConversionMethod) -> Self {
        Self {
            id: ConversionId::new(),
            input,
            method,
        }
    }

    pub fn pdf(path: impl Into<PathBuf>, file_name: impl Into<String>, method: ConversionMethod) -> Self {
        Self::new(
            ConversionInput::Pdf {
                path: path.into(),
                file_name: file_name.into(),
            },
            method,
        )
    }

    pub fn website(url: impl Into<String>, method: ConversionMethod) -> Self {
        Self::new(ConversionInput::Website { url: url.into() }, method)
    }

    /// File name of the Markdown artifact stored for this request.
    pub fn artifact_name(&self) -> String {
        match &self.input {
            ConversionInput::Pdf { file_name, .. } => {
                let stem = std::path::Path::new(file_name)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .filter(|s| !s.is_empty())
                    .unwrap_or("document");
                format!("{}.md", sanitize_file_name(stem))
            }
            ConversionInput::Website { url } => {
                let host = url::Url::parse(url)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_string))
                    .unwrap_or_else(|| "website".to_string());
                format!("{}.md", sanitize_file_name(&host))
            }
        }
    }
}

fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
