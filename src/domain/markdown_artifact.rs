/// Generated Markdown for one conversion. Never handed to the caller
/// directly; it is written to scratch, uploaded, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownArtifact {
    content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("generated markdown is empty")]
pub struct EmptyArtifact;

impl MarkdownArtifact {
    pub fn new(content: impl Into<String>) -> Result<Self, EmptyArtifact> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(EmptyArtifact);
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}
