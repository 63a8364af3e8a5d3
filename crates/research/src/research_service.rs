use std::sync::Arc;

use campaign_scout_core::{
    Campaign, CampaignSubmission, CampaignWithResults, MAX_CAMPAIGN_LIST_LIMIT, NO_MATCHES_NOTICE,
    NormalizedInput, PROVIDER_NOT_CONFIGURED_NOTICE, ResearchResults, Vertical, VerticalResult,
    normalize,
};
use campaign_scout_providers::Providers;
use campaign_scout_storage::CampaignStore;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::fetch::{Notice, VerticalFetch};
use crate::{dj, dsp, fallback, press, radio};

/// Outcome of one research run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchReport {
    /// Set once the campaign and all its rows were written.
    pub campaign_id: Option<String>,
    pub inputs: Vec<NormalizedInput>,
    pub results: ResearchResults,
    pub notices: Vec<Notice>,
    pub saved: bool,
}

/// Fans a submission out to the vertical fetchers and persists the outcome.
pub struct ResearchService {
    providers: Arc<Providers>,
    store: Option<Arc<dyn CampaignStore>>,
    seed: Option<u64>,
}

impl ResearchService {
    #[must_use]
    pub fn new(providers: Arc<Providers>, store: Option<Arc<dyn CampaignStore>>) -> Self {
        Self { providers, store, seed: None }
    }

    /// Make sample data reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    #[must_use]
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_os_rng(),
        }
    }

    fn store(&self) -> Result<&Arc<dyn CampaignStore>, ServiceError> {
        self.store.as_ref().ok_or_else(|| ServiceError::NotConfigured("campaign storage".to_owned()))
    }

    /// Validate, normalize and research a submission without persisting it.
    pub async fn run(&self, submission: &CampaignSubmission) -> Result<ResearchReport, ServiceError> {
        submission.validate()?;
        let inputs = normalize(&submission.reference_inputs);
        let verticals = submission.verticals();
        tracing::info!(
            campaign = %submission.campaign_name.trim(),
            inputs = inputs.len(),
            verticals = ?verticals,
            "research started"
        );

        let (results, notices) = self.research(&inputs, &verticals).await;
        Ok(ResearchReport { campaign_id: None, inputs, results, notices, saved: false })
    }

    /// Research a submission and write the campaign through to storage.
    ///
    /// A storage failure does not fail the call: the report carries the
    /// computed results with `saved == false` and a warning notice.
    pub async fn submit(
        &self,
        submission: &CampaignSubmission,
    ) -> Result<ResearchReport, ServiceError> {
        let store = Arc::clone(self.store()?);
        let mut report = self.run(submission).await?;

        let saved = store
            .save_campaign(submission.campaign_name.trim(), &report.inputs, &report.results)
            .await;
        match saved {
            Ok(campaign) => {
                tracing::info!(campaign_id = %campaign.id, total = report.results.total(), "campaign saved");
                report.campaign_id = Some(campaign.id);
                report.saved = true;
            },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    transient = e.is_transient(),
                    "failed to save campaign, nothing was stored"
                );
                report.notices.push(Notice::warning(
                    "Results were computed but could not be saved",
                ));
            },
        }
        Ok(report)
    }

    /// Run the selected fetchers in parallel and apply the empty-result
    /// configuration check.
    pub async fn research(
        &self,
        inputs: &[NormalizedInput],
        verticals: &[Vertical],
    ) -> (ResearchResults, Vec<Notice>) {
        let shared: Arc<[NormalizedInput]> = Arc::from(inputs);
        let mut handles = Vec::with_capacity(verticals.len());

        for (stream, &vertical) in (0_u64..).zip(verticals) {
            let providers = Arc::clone(&self.providers);
            let inputs = Arc::clone(&shared);
            let mut rng = self.rng(stream);
            let handle = tokio::spawn(async move {
                match vertical {
                    Vertical::Dsp => dsp::fetch(&providers.playlist, &inputs).await,
                    Vertical::Radio => radio::fetch(&providers.airplay, &inputs).await,
                    Vertical::Dj => dj::fetch(&providers.airplay, &inputs, &mut rng).await,
                    Vertical::Press => press::fetch(&inputs, &mut rng),
                }
            });
            handles.push((vertical, handle));
        }

        let mut tagged: Vec<VerticalResult> = Vec::new();
        let mut notices = Vec::new();
        for (vertical, handle) in handles {
            let fetch = match handle.await {
                Ok(fetch) => fetch,
                Err(e) => {
                    tracing::error!(%vertical, error = %e, "vertical fetch task failed");
                    notices.push(Notice::warning(format!("{}: research failed", vertical.label())));
                    VerticalFetch::default()
                },
            };
            tracing::info!(
                %vertical,
                results = fetch.results.len(),
                fallback = fetch.used_fallback,
                "vertical fetch settled"
            );
            notices.extend(fetch.warnings.into_iter().map(Notice::warning));
            tagged.extend(fetch.results);
        }

        let mut results = ResearchResults::from_tagged(tagged);
        if results.is_empty() && !inputs.is_empty() {
            if self.providers.airplay.is_configured() {
                notices.push(Notice::info(NO_MATCHES_NOTICE));
            } else {
                notices.push(Notice::warning(PROVIDER_NOT_CONFIGURED_NOTICE));
            }
            let mut rng = self.rng(u64::from(u8::MAX));
            results = fallback::generate(inputs, verticals, Utc::now(), &mut rng);
        }
        (results, notices)
    }

    pub async fn get_campaign(&self, campaign_id: &str) -> Result<CampaignWithResults, ServiceError> {
        self.store()?
            .get_campaign_with_results(campaign_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(campaign_id.to_owned()))
    }

    pub async fn list_campaigns(&self, limit: usize) -> Result<Vec<Campaign>, ServiceError> {
        let limit = limit.clamp(1, MAX_CAMPAIGN_LIST_LIMIT);
        Ok(self.store()?.list_campaigns(limit).await?)
    }
}
