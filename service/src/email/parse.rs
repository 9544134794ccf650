//! Turning raw model output into a subject and body.
//!
//! Parsing runs as a pipeline of independent stages:
//!
//! 1. [`parse_strict`] - the text is a JSON object with string `subject` and
//!    `body` (optionally inside a markdown code fence)
//! 2. [`parse_fallback`] - pattern extraction of the two fields from text
//!    that is not valid JSON
//! 3. terminal failure, [`EmailParseError`]
//!
//! [`parse_email`] chains them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::unwrap_used)] // literal patterns
static SUBJECT_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)subject["\s:]+([^"]+)"#).unwrap());

#[allow(clippy::unwrap_used)] // literal patterns
static BODY_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)body["\s:]+([^}]+)"#).unwrap());

/// A drafted email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// The model output could not be read by any stage.
#[derive(Debug, thiserror::Error)]
#[error("could not extract subject and body from model output: {strict}")]
pub struct EmailParseError {
    /// Why the strict JSON stage rejected the text
    pub strict: serde_json::Error,
}

/// Stage 1: strict JSON.
///
/// # Errors
/// Returns the JSON error when the text is not an object with string
/// `subject` and `body` fields.
pub fn parse_strict(raw: &str) -> Result<EmailContent, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw))
}

/// Stage 2: best-effort field extraction.
///
/// Returns `None` unless both fields are found and non-empty. A reply with
/// an empty subject is treated as unparseable rather than sent without one.
#[must_use]
pub fn parse_fallback(raw: &str) -> Option<EmailContent> {
    let subject = SUBJECT_FIELD.captures(raw)?.get(1)?.as_str().trim();
    let body = BODY_FIELD.captures(raw)?.get(1)?.as_str().trim();
    let body = body.strip_prefix('"').unwrap_or(body);
    let body = body.strip_suffix('"').unwrap_or(body);

    if subject.is_empty() || body.is_empty() {
        return None;
    }

    Some(EmailContent {
        subject: subject.to_string(),
        body: body.to_string(),
    })
}

/// Run both stages in order.
///
/// # Errors
/// Returns [`EmailParseError`] when neither stage yields an email.
pub fn parse_email(raw: &str) -> Result<EmailContent, EmailParseError> {
    match parse_strict(raw) {
        Ok(content) => Ok(content),
        Err(strict) => {
            tracing::warn!(error = %strict, raw = %raw, "model output is not strict JSON, trying field extraction");
            parse_fallback(raw).ok_or(EmailParseError { strict })
        }
    }
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
