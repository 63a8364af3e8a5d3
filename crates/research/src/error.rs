//! Typed error enum for the research layer.

use campaign_scout_core::CoreError;
use campaign_scout_providers::ProviderError;
use campaign_scout_storage::StorageError;
use thiserror::Error;

/// Research-layer error unifying validation, provider and storage failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Provider relay call failed.
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    /// Submission or request failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Campaign lookup missed.
    #[error("campaign not found: {0}")]
    NotFound(String),

    /// A required backend is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl ServiceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Storage(StorageError::NotFound { .. }))
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
