//! Fetcher output and provider payload helpers.

use campaign_scout_core::{VerticalResult, parse_provider_date};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What one vertical fetcher produced for one submission.
#[derive(Debug, Clone, Default)]
pub struct VerticalFetch {
    pub results: Vec<VerticalResult>,
    /// Advisory messages surfaced to the user.
    pub warnings: Vec<String>,
    /// Inputs the fetcher tried to query.
    pub attempted: usize,
    /// Well-formed provider responses received.
    pub succeeded: usize,
    /// Missing or rejected credentials stopped the loop.
    pub provider_unavailable: bool,
    pub used_fallback: bool,
}

impl VerticalFetch {
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Advisory message attached to a research report. Never blocks the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }
}

/// Non-empty string field; providers send ids as either strings or numbers.
pub(crate) fn json_str(value: &serde_json::Value, key: &str) -> Option<String> {
    match value.get(key)? {
        serde_json::Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        },
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-negative count; numeric strings are accepted.
pub(crate) fn json_u64(value: &serde_json::Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn json_date(value: &serde_json::Value, key: &str) -> Option<DateTime<Utc>> {
    value.get(key)?.as_str().and_then(parse_provider_date)
}
