//! Persistence trait for campaigns and their research results.

use async_trait::async_trait;
use campaign_scout_core::{
    Campaign, CampaignWithResults, NormalizedInput, ResearchResults, Vertical, VerticalResult,
};

use crate::error::StorageError;

/// Campaign persistence. Campaigns are written once and never updated.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Insert a campaign row and return it with its generated id.
    async fn create_campaign(&self, name: &str) -> Result<Campaign, StorageError>;

    /// Store the normalized inputs of a campaign.
    async fn save_reference_inputs(
        &self,
        campaign_id: &str,
        inputs: &[NormalizedInput],
    ) -> Result<(), StorageError>;

    /// Store one vertical's results. Every entry must carry `vertical`'s tag.
    async fn save_vertical_results(
        &self,
        campaign_id: &str,
        vertical: Vertical,
        results: &[VerticalResult],
    ) -> Result<(), StorageError>;

    /// Write a campaign, its inputs and every result list as one unit.
    ///
    /// Either everything is stored or nothing is; a failed call leaves no
    /// campaign behind.
    async fn save_campaign(
        &self,
        name: &str,
        inputs: &[NormalizedInput],
        results: &ResearchResults,
    ) -> Result<Campaign, StorageError>;

    /// Load a campaign with its inputs and all four result lists, or `None`.
    async fn get_campaign_with_results(
        &self,
        campaign_id: &str,
    ) -> Result<Option<CampaignWithResults>, StorageError>;

    /// Most recent campaigns first.
    async fn list_campaigns(&self, limit: usize) -> Result<Vec<Campaign>, StorageError>;
}
