use std::sync::Arc;

use anyhow::Result;
use campaign_scout_storage::{CampaignStore, PgStorage};

pub(crate) mod research;
pub(crate) mod serve;

/// Connect to Postgres when `DATABASE_URL` is set.
pub(crate) async fn connect_store() -> Result<Option<Arc<dyn CampaignStore>>> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => {
            let storage = PgStorage::new(&url).await?;
            tracing::info!("Connected to PostgreSQL campaign storage");
            Ok(Some(Arc::new(storage)))
        },
        _ => Ok(None),
    }
}
