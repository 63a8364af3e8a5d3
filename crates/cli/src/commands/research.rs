use std::sync::Arc;

use anyhow::{Result, bail};
use campaign_scout_core::{CampaignSubmission, Vertical, normalize as normalize_inputs};
use campaign_scout_providers::Providers;
use campaign_scout_research::ResearchService;

use super::connect_store;

pub(crate) async fn run(
    name: String,
    inputs: Vec<String>,
    verticals: Vec<Vertical>,
    seed: Option<u64>,
) -> Result<()> {
    let providers = Arc::new(Providers::from_env()?);
    let mut service = ResearchService::new(providers, None);
    if let Some(seed) = seed {
        service = service.with_seed(seed);
    }

    let submission =
        CampaignSubmission { campaign_name: name, reference_inputs: inputs, selected_verticals: verticals };
    let report = service.run(&submission).await?;
    for notice in &report.notices {
        tracing::info!(level = ?notice.level, "{}", notice.message);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn normalize(inputs: &[String]) -> Result<()> {
    let normalized = normalize_inputs(inputs);
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

pub(crate) async fn list_campaigns(limit: usize) -> Result<()> {
    let Some(store) = connect_store().await? else {
        bail!("DATABASE_URL must be set to list campaigns");
    };
    let service = ResearchService::new(Arc::new(Providers::from_env()?), Some(store));
    let campaigns = service.list_campaigns(limit).await?;
    println!("{}", serde_json::to_string_pretty(&campaigns)?);
    Ok(())
}
