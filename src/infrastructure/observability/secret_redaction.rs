use std::sync::LazyLock;

use regex::Regex;

const REDACTED: &str = "[REDACTED]";
const MAX_LOGGED_LENGTH: usize = 500;

static BEARER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(bearer\s+)[A-Za-z0-9._~+/=-]+").unwrap());

static JSON_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)("(?:access_token|client_secret|token|api_key|password)"\s*:\s*")[^"]*(")"#)
        .unwrap()
});

static QUERY_SECRET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((?:access_token|client_secret|token|api_key|password)=)[^&\s]+").unwrap()
});

/// Masks credentials in text returned by remote services before it is logged
/// or surfaced in an error. Long bodies are truncated.
pub fn redact_secrets(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let redacted = BEARER.replace_all(trimmed, format!("${{1}}{REDACTED}"));
    let redacted = JSON_SECRET.replace_all(&redacted, format!("${{1}}{REDACTED}${{2}}"));
    let redacted = QUERY_SECRET.replace_all(&redacted, format!("${{1}}{REDACTED}"));

    truncate(&redacted)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_LOGGED_LENGTH {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_LOGGED_LENGTH).collect();
    format!("{head}... ({} chars total)", text.chars().count())
}
