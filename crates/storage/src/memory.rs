//! Process-local campaign store used when no database is configured.
//!
//! Data lives as long as the process. Same contract as `PgStorage`,
//! including the vertical check on result batches.

use std::sync::Mutex;

use async_trait::async_trait;
use campaign_scout_core::{
    Campaign, CampaignWithResults, NormalizedInput, ResearchResults, Vertical, VerticalResult,
    flatten,
};
use chrono::Utc;

use crate::error::StorageError;
use crate::traits::CampaignStore;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    campaigns: Mutex<Vec<CampaignWithResults>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_campaign<T>(
        &self,
        campaign_id: &str,
        f: impl FnOnce(&mut CampaignWithResults) -> T,
    ) -> Result<T, StorageError> {
        let mut campaigns = self.campaigns.lock().map_err(|_| poisoned())?;
        let entry = campaigns
            .iter_mut()
            .find(|c| c.campaign.id == campaign_id)
            .ok_or_else(|| StorageError::NotFound { entity: "campaign", id: campaign_id.to_owned() })?;
        Ok(f(entry))
    }
}

fn poisoned() -> StorageError {
    StorageError::InvalidInput("campaign store lock poisoned".to_owned())
}

#[async_trait]
impl CampaignStore for MemoryStorage {
    async fn create_campaign(&self, name: &str) -> Result<Campaign, StorageError> {
        let campaign = Campaign {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_owned(),
            created_at: Utc::now(),
        };
        self.campaigns.lock().map_err(|_| poisoned())?.push(CampaignWithResults {
            campaign: campaign.clone(),
            inputs: Vec::new(),
            results: ResearchResults::default(),
        });
        Ok(campaign)
    }

    async fn save_reference_inputs(
        &self,
        campaign_id: &str,
        inputs: &[NormalizedInput],
    ) -> Result<(), StorageError> {
        self.with_campaign(campaign_id, |entry| entry.inputs.extend_from_slice(inputs))
    }

    async fn save_vertical_results(
        &self,
        campaign_id: &str,
        vertical: Vertical,
        results: &[VerticalResult],
    ) -> Result<(), StorageError> {
        if let Some(stray) = results.iter().find(|r| r.vertical() != vertical) {
            return Err(StorageError::InvalidInput(format!(
                "{} result {} in {vertical} batch",
                stray.vertical(),
                stray.id()
            )));
        }
        self.with_campaign(campaign_id, |entry| {
            let mut all = flatten(&entry.results);
            all.extend(results.iter().cloned());
            entry.results = ResearchResults::from_tagged(all);
        })
    }

    async fn save_campaign(
        &self,
        name: &str,
        inputs: &[NormalizedInput],
        results: &ResearchResults,
    ) -> Result<Campaign, StorageError> {
        let campaign = Campaign {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_owned(),
            created_at: Utc::now(),
        };
        let entry = CampaignWithResults {
            campaign: campaign.clone(),
            inputs: inputs.to_vec(),
            results: results.clone(),
        };
        self.campaigns.lock().map_err(|_| poisoned())?.push(entry);
        Ok(campaign)
    }

    async fn get_campaign_with_results(
        &self,
        campaign_id: &str,
    ) -> Result<Option<CampaignWithResults>, StorageError> {
        let campaigns = self.campaigns.lock().map_err(|_| poisoned())?;
        Ok(campaigns.iter().find(|c| c.campaign.id == campaign_id).cloned())
    }

    async fn list_campaigns(&self, limit: usize) -> Result<Vec<Campaign>, StorageError> {
        let campaigns = self.campaigns.lock().map_err(|_| poisoned())?;
        Ok(campaigns.iter().rev().take(limit).map(|c| c.campaign.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_scout_core::{InputType, PressArticle};

    fn article(id: &str) -> VerticalResult {
        VerticalResult::Press(PressArticle {
            id: id.to_owned(),
            outlet: "NME".to_owned(),
            title: "First Listen".to_owned(),
            published_at: None,
            author: None,
            url: None,
            matched_inputs: [0].into(),
        })
    }

    #[tokio::test]
    async fn stores_and_loads_campaign() {
        let store = MemoryStorage::new();
        let campaign = store.create_campaign("  Launch  ").await.unwrap();
        assert_eq!(campaign.name, "Launch");

        let inputs = vec![NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 1)];
        store.save_reference_inputs(&campaign.id, &inputs).await.unwrap();
        store.save_vertical_results(&campaign.id, Vertical::Press, &[article("a"), article("b")]).await.unwrap();

        let loaded = store.get_campaign_with_results(&campaign.id).await.unwrap().unwrap();
        assert_eq!(loaded.inputs, inputs);
        let ids: Vec<_> = loaded.results.press_results.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn rejects_mixed_batches_and_unknown_campaigns() {
        let store = MemoryStorage::new();
        let campaign = store.create_campaign("x").await.unwrap();
        let err = store.save_vertical_results(&campaign.id, Vertical::Dsp, &[article("a")]).await;
        assert!(matches!(err, Err(StorageError::InvalidInput(_))));

        let err = store.save_reference_inputs("missing", &[]).await;
        assert!(matches!(err, Err(StorageError::NotFound { .. })));
        assert!(store.get_campaign_with_results("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_campaign_stores_everything_at_once() {
        let store = MemoryStorage::new();
        let inputs = vec![NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 2)];
        let results = ResearchResults::from_tagged([article("a"), article("b")]);

        let campaign = store.save_campaign(" Tour ", &inputs, &results).await.unwrap();
        assert_eq!(campaign.name, "Tour");

        let loaded = store.get_campaign_with_results(&campaign.id).await.unwrap().unwrap();
        assert_eq!(loaded.campaign, campaign);
        assert_eq!(loaded.inputs, inputs);
        assert_eq!(loaded.results, results);
        assert_eq!(store.list_campaigns(10).await.unwrap(), vec![campaign]);
    }

    #[tokio::test]
    async fn lists_newest_first_with_limit() {
        let store = MemoryStorage::new();
        let first = store.create_campaign("first").await.unwrap();
        let second = store.create_campaign("second").await.unwrap();
        let listed = store.list_campaigns(10).await.unwrap();
        assert_eq!(listed, vec![second, first]);
        assert_eq!(store.list_campaigns(1).await.unwrap().len(), 1);
    }
}
