//! Provider configuration read from the environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use campaign_scout_core::{
    DEFAULT_PROVIDER_MAX_ATTEMPTS, DEFAULT_PROVIDER_RETRY_DELAY_MS, DEFAULT_PROVIDER_TIMEOUT_SECS,
    env_parse_with_default,
};
use serde::{Deserialize, Serialize};

/// The external data providers the relay can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Playlist-membership data for streaming services (DSP vertical).
    Playlist,
    /// Radio airplay and DJ tracklist data.
    Airplay,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Playlist => "playlist",
            Self::Airplay => "airplay",
        }
    }

    const fn env_prefix(&self) -> &'static str {
        match *self {
            Self::Playlist => "SCOUT_PLAYLIST_API",
            Self::Airplay => "SCOUT_AIRPLAY_API",
        }
    }

    const fn default_base_url(&self) -> &'static str {
        match *self {
            Self::Playlist => "https://api.playlist-provider.example/v1",
            Self::Airplay => "https://api.airplay-provider.example/v1",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "playlist" => Ok(Self::Playlist),
            "airplay" => Ok(Self::Airplay),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// Connection settings for one provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    /// `None` means the provider is unconfigured; calls fail without touching the network.
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl ProviderConfig {
    /// Defaults for `kind` with the given key and base URL.
    #[must_use]
    pub fn new(kind: ProviderKind, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            kind,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            max_attempts: DEFAULT_PROVIDER_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_PROVIDER_RETRY_DELAY_MS),
        }
    }

    /// Read `SCOUT_<KIND>_API_URL` / `SCOUT_<KIND>_API_KEY` plus the shared
    /// timeout and retry settings.
    #[must_use]
    pub fn from_env(kind: ProviderKind) -> Self {
        let prefix = kind.env_prefix();
        let base_url = std::env::var(format!("{prefix}_URL"))
            .unwrap_or_else(|_| kind.default_base_url().to_owned());
        let api_key = std::env::var(format!("{prefix}_KEY")).ok();

        let mut config = Self::new(kind, base_url, api_key);
        config.timeout = Duration::from_secs(env_parse_with_default(
            "SCOUT_PROVIDER_TIMEOUT_SECS",
            DEFAULT_PROVIDER_TIMEOUT_SECS,
        ));
        config.max_attempts =
            env_parse_with_default("SCOUT_PROVIDER_MAX_ATTEMPTS", DEFAULT_PROVIDER_MAX_ATTEMPTS)
                .max(1);
        config.retry_delay = Duration::from_millis(env_parse_with_default(
            "SCOUT_PROVIDER_RETRY_DELAY_MS",
            DEFAULT_PROVIDER_RETRY_DELAY_MS,
        ));
        if config.api_key.is_none() {
            tracing::info!(provider = %kind, "{prefix}_KEY not set, provider disabled");
        }
        config
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_counts_as_unconfigured() {
        let config = ProviderConfig::new(ProviderKind::Airplay, "http://x", Some("  ".to_owned()));
        assert!(!config.is_configured());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = ProviderConfig::new(ProviderKind::Playlist, "http://x", Some("secret".to_owned()));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn max_attempts_never_drops_below_one() {
        let config = ProviderConfig::new(ProviderKind::Playlist, "http://x", None).with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);
    }

    #[test]
    fn provider_kind_parses() {
        assert_eq!("Airplay".parse::<ProviderKind>().unwrap(), ProviderKind::Airplay);
        assert!("radio".parse::<ProviderKind>().is_err());
    }
}
