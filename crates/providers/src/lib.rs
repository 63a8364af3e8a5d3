//! Clients for the external playlist and airplay data providers.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;


pub use client::{ProviderClient, backoff_delay, truncate, validate_relay_path};
pub use config::{ProviderConfig, ProviderKind};
pub use error::ProviderError;

/// Both provider clients, built once at startup.
#[derive(Debug)]
pub struct Providers {
    pub playlist: ProviderClient,
    pub airplay: ProviderClient,
}

impl Providers {
    /// Build both clients from `SCOUT_*` environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        Ok(Self {
            playlist: ProviderClient::new(ProviderConfig::from_env(ProviderKind::Playlist))?,
            airplay: ProviderClient::new(ProviderConfig::from_env(ProviderKind::Airplay))?,
        })
    }

    #[must_use]
    pub const fn get(&self, kind: ProviderKind) -> &ProviderClient {
        match kind {
            ProviderKind::Playlist => &self.playlist,
            ProviderKind::Airplay => &self.airplay,
        }
    }

    /// Relay an arbitrary GET to one provider.
    ///
    /// The path is checked before any request is made; `params` become the
    /// query string.
    pub async fn relay(
        &self,
        kind: ProviderKind,
        path: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, ProviderError> {
        validate_relay_path(path)?;
        self.get(kind).get(path, params).await
    }
}
