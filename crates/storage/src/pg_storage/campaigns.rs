//! CampaignStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use campaign_scout_core::{CampaignWithResults, ResearchResults, Vertical, VerticalResult, flatten};
use chrono::Utc;
use sqlx::{Postgres, Transaction};

use crate::traits::CampaignStore;

const CAMPAIGN_COLUMNS: &str = "id, name, created_at";
const INPUT_COLUMNS: &str = "input_id, input_type, original_url, input_index";
const DSP_COLUMNS: &str = "result_id, name, curator, followers, last_updated, url, matched_inputs";
const RADIO_COLUMNS: &str = "result_id, name, market, country, plays, last_played, url, \
                             summary_category, matched_inputs";
const DJ_COLUMNS: &str = "result_id, dj_name, event_name, event_date, venue, url, matched_inputs";
const PRESS_COLUMNS: &str =
    "result_id, outlet, title, published_at, author, url, matched_inputs";

fn new_campaign(name: &str) -> Campaign {
    Campaign {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.trim().to_owned(),
        created_at: Utc::now(),
    }
}

async fn insert_campaign(
    tx: &mut Transaction<'_, Postgres>,
    campaign: &Campaign,
) -> Result<(), StorageError> {
    sqlx::query(&format!("INSERT INTO campaigns ({CAMPAIGN_COLUMNS}) VALUES ($1,$2,$3)"))
        .bind(&campaign.id)
        .bind(&campaign.name)
        .bind(campaign.created_at)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn insert_inputs(
    tx: &mut Transaction<'_, Postgres>,
    campaign_id: &str,
    inputs: &[NormalizedInput],
) -> Result<(), StorageError> {
    for input in inputs {
        let index = i32::try_from(input.input_index)
            .map_err(|e| StorageError::corrupt("input_index exceeds i32::MAX", e))?;
        sqlx::query(&format!(
            "INSERT INTO reference_inputs (campaign_id, {INPUT_COLUMNS}) VALUES ($1,$2,$3,$4,$5)"
        ))
        .bind(campaign_id)
        .bind(&input.id)
        .bind(input.input_type.as_str())
        .bind(&input.original_url)
        .bind(index)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_result(
    tx: &mut Transaction<'_, Postgres>,
    campaign_id: &str,
    entry: &VerticalResult,
) -> Result<(), StorageError> {
    let matched = matched_to_column(entry.matched_inputs())?;
    let vertical = entry.vertical().as_str();
    match entry {
        VerticalResult::Dsp(p) => {
            let followers = p.followers.map(|f| count_to_column(f, "followers")).transpose()?;
            sqlx::query(&format!(
                "INSERT INTO dsp_results (campaign_id, vertical, {DSP_COLUMNS})
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)"
            ))
            .bind(campaign_id)
            .bind(vertical)
            .bind(&p.id)
            .bind(&p.name)
            .bind(&p.curator)
            .bind(followers)
            .bind(p.last_updated)
            .bind(&p.url)
            .bind(matched)
            .execute(&mut **tx)
            .await?;
        },
        VerticalResult::Radio(r) => {
            sqlx::query(&format!(
                "INSERT INTO radio_results (campaign_id, vertical, {RADIO_COLUMNS})
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)"
            ))
            .bind(campaign_id)
            .bind(vertical)
            .bind(&r.id)
            .bind(&r.name)
            .bind(&r.market)
            .bind(&r.country)
            .bind(count_to_column(r.plays, "plays")?)
            .bind(r.last_played)
            .bind(&r.url)
            .bind(r.summary_category.map(|c| c.as_str()))
            .bind(matched)
            .execute(&mut **tx)
            .await?;
        },
        VerticalResult::Dj(d) => {
            sqlx::query(&format!(
                "INSERT INTO dj_results (campaign_id, vertical, {DJ_COLUMNS})
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)"
            ))
            .bind(campaign_id)
            .bind(vertical)
            .bind(&d.id)
            .bind(&d.dj_name)
            .bind(&d.event_name)
            .bind(d.event_date)
            .bind(&d.venue)
            .bind(&d.url)
            .bind(matched)
            .execute(&mut **tx)
            .await?;
        },
        VerticalResult::Press(a) => {
            sqlx::query(&format!(
                "INSERT INTO press_results (campaign_id, vertical, {PRESS_COLUMNS})
                 VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)"
            ))
            .bind(campaign_id)
            .bind(vertical)
            .bind(&a.id)
            .bind(&a.outlet)
            .bind(&a.title)
            .bind(a.published_at)
            .bind(&a.author)
            .bind(&a.url)
            .bind(matched)
            .execute(&mut **tx)
            .await?;
        },
    }
    Ok(())
}

impl PgStorage {
    async fn fetch_rows(
        &self,
        table: &str,
        columns: &str,
        campaign_id: &str,
    ) -> Result<Vec<PgRow>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {columns} FROM {table} WHERE campaign_id = $1 ORDER BY id"
        ))
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl CampaignStore for PgStorage {
    async fn create_campaign(&self, name: &str) -> Result<Campaign, StorageError> {
        let campaign = new_campaign(name);
        let mut tx = self.pool.begin().await?;
        insert_campaign(&mut tx, &campaign).await?;
        tx.commit().await?;
        tracing::debug!(campaign_id = %campaign.id, "campaign created");
        Ok(campaign)
    }

    async fn save_reference_inputs(
        &self,
        campaign_id: &str,
        inputs: &[NormalizedInput],
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        insert_inputs(&mut tx, campaign_id, inputs).await?;
        tx.commit().await?;
        Ok(())
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
        if results.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await?;
        for entry in results {
            insert_result(&mut tx, campaign_id, entry).await?;
        }
        tx.commit().await?;
        tracing::debug!(campaign_id, %vertical, count = results.len(), "vertical results saved");
        Ok(())
    }

    async fn save_campaign(
        &self,
        name: &str,
        inputs: &[NormalizedInput],
        results: &ResearchResults,
    ) -> Result<Campaign, StorageError> {
        let campaign = new_campaign(name);
        let entries = flatten(results);
        // Dropping the transaction on any `?` rolls back the whole campaign.
        let mut tx = self.pool.begin().await?;
        insert_campaign(&mut tx, &campaign).await?;
        insert_inputs(&mut tx, &campaign.id, inputs).await?;
        for entry in &entries {
            insert_result(&mut tx, &campaign.id, entry).await?;
        }
        tx.commit().await?;
        tracing::debug!(
            campaign_id = %campaign.id,
            inputs = inputs.len(),
            results = entries.len(),
            "campaign saved"
        );
        Ok(campaign)
    }

    async fn get_campaign_with_results(
        &self,
        campaign_id: &str,
    ) -> Result<Option<CampaignWithResults>, StorageError> {
        let row = sqlx::query(&format!("SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"))
            .bind(campaign_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let campaign = row_to_campaign(&row)?;

        let inputs = sqlx::query(&format!(
            "SELECT {INPUT_COLUMNS} FROM reference_inputs WHERE campaign_id = $1 ORDER BY input_index, id"
        ))
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(row_to_input)
        .collect::<Result<Vec<_>, _>>()?;

        let results = ResearchResults {
            dsp_results: self
                .fetch_rows("dsp_results", DSP_COLUMNS, campaign_id)
                .await?
                .iter()
                .map(row_to_playlist)
                .collect::<Result<_, _>>()?,
            radio_results: self
                .fetch_rows("radio_results", RADIO_COLUMNS, campaign_id)
                .await?
                .iter()
                .map(row_to_radio)
                .collect::<Result<_, _>>()?,
            dj_results: self
                .fetch_rows("dj_results", DJ_COLUMNS, campaign_id)
                .await?
                .iter()
                .map(row_to_dj_event)
                .collect::<Result<_, _>>()?,
            press_results: self
                .fetch_rows("press_results", PRESS_COLUMNS, campaign_id)
                .await?
                .iter()
                .map(row_to_article)
                .collect::<Result<_, _>>()?,
        };

        Ok(Some(CampaignWithResults { campaign, inputs, results }))
    }

    async fn list_campaigns(&self, limit: usize) -> Result<Vec<Campaign>, StorageError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY created_at DESC, id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_campaign).collect()
    }
}
