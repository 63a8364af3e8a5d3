use std::sync::Arc;

use anyhow::Result;
use campaign_scout_http::{AppState, create_router};
use campaign_scout_providers::Providers;
use campaign_scout_research::ResearchService;
use campaign_scout_storage::{CampaignStore, MemoryStorage};

use super::connect_store;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let providers = Arc::new(Providers::from_env()?);
    for client in [&providers.playlist, &providers.airplay] {
        if !client.is_configured() {
            tracing::warn!(provider = %client.kind(), "API key not set, provider disabled");
        }
    }

    let store: Arc<dyn CampaignStore> = match connect_store().await? {
        Some(store) => store,
        None => {
            tracing::warn!("DATABASE_URL not set, campaigns are kept in memory until shutdown");
            Arc::new(MemoryStorage::new())
        },
    };

    let research = Arc::new(ResearchService::new(providers, Some(store)));
    let router = create_router(Arc::new(AppState { research }));
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
