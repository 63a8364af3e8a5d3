//! Response types (Serialize)

use campaign_scout_core::{ResearchResults, VerticalResult};
use campaign_scout_providers::ProviderKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Stored results, either grouped per vertical or as one tagged list.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResultsResponse {
    Grouped(ResearchResults),
    Flat(Vec<VerticalResult>),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub provider: ProviderKind,
    pub configured: bool,
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersStatusResponse {
    pub providers: Vec<ProviderStatus>,
    pub storage: bool,
}
