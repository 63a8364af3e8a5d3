use std::time::Duration;

use serde::Serialize;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::ProviderError;

/// Maximum characters of a response body kept in error messages.
pub const MAX_ERROR_BODY_LEN: usize = 500;

/// Client for one external data provider.
///
/// Every call is a GET with bearer auth. Rate limits, server errors and
/// network failures are retried in a bounded loop; anything else is returned
/// to the caller on the first attempt.
pub struct ProviderClient {
    pub(crate) client: reqwest::Client,
    pub(crate) config: ProviderConfig,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient").field("config", &self.config).finish()
    }
}

impl ProviderClient {
    /// Creates a client for the given provider settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(mut config: ProviderConfig) -> Result<Self, ProviderError> {
        config.base_url = config.base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::ClientInit(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        self.config.kind
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// GET `path` with `query` and return the provider JSON verbatim.
    ///
    /// # Errors
    /// `NotConfigured` when no API key is set, `Unauthorized` on 401/403,
    /// `HttpStatus` on other non-retryable statuses, `JsonParse` when the body
    /// is not JSON, and `RetriesExhausted` once every attempt failed
    /// transiently.
    pub async fn get<Q>(&self, path: &str, query: &Q) -> Result<serde_json::Value, ProviderError>
    where
        Q: Serialize + ?Sized,
    {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured(self.config.kind));
        };
        let url = format!("{}{}", self.config.base_url, path);
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error: Option<ProviderError> = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = backoff_delay(attempt - 1, self.config.retry_delay);
                tracing::warn!(
                    provider = %self.config.kind,
                    path,
                    "provider retry attempt {attempt}/{max_attempts} after {delay:?}"
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(&url).bearer_auth(api_key).query(query).send().await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ProviderError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(ProviderError::HttpRequest(e));
                        continue;
                    },
                };
                return serde_json::from_str(&body).map_err(|e| ProviderError::JsonParse {
                    context: format!("{} {path} (body: {})", self.config.kind, truncate(&body, 200)),
                    source: e,
                });
            }

            let code = status.as_u16();
            let body = response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            let body = truncate(&body, MAX_ERROR_BODY_LEN).to_owned();

            if code == 401 || code == 403 {
                return Err(ProviderError::Unauthorized { code, body });
            }

            let err = ProviderError::HttpStatus { code, body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(ProviderError::RetriesExhausted(Box::new(
            last_error.unwrap_or(ProviderError::HttpStatus { code: 0, body: String::new() }),
        )))
    }
}

/// Linear backoff: the n-th retry waits `n × base`.
#[must_use]
pub fn backoff_delay(retry: u32, base: Duration) -> Duration {
    base.saturating_mul(retry)
}

/// Relay paths must be absolute provider paths, never full URLs or traversals.
pub fn validate_relay_path(path: &str) -> Result<(), ProviderError> {
    if !path.starts_with('/')
        || path.starts_with("//")
        || path.contains("://")
        || path.contains("..")
        || path.contains('?')
    {
        return Err(ProviderError::InvalidPath(path.to_owned()));
    }
    Ok(())
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
