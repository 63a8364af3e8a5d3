//! PostgreSQL storage backend using sqlx.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod campaigns;

use campaign_scout_core::{
    Campaign, DjEvent, InputType, MatchedInputs, NormalizedInput, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, Playlist, PressArticle, RadioCategory,
    RadioStation,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect, run migrations and return a ready store.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Matched inputs as stored: `NULL` for an empty set, ascending otherwise.
pub(crate) fn matched_to_column(
    matched: &MatchedInputs,
) -> Result<Option<Vec<i32>>, StorageError> {
    if matched.is_empty() {
        return Ok(None);
    }
    matched
        .iter()
        .map(|&i| i32::try_from(i).map_err(|e| StorageError::corrupt("input index exceeds i32::MAX", e)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Inverse of [`matched_to_column`]. Negative indices are dropped.
pub(crate) fn matched_from_column(column: Option<Vec<i32>>) -> MatchedInputs {
    column
        .unwrap_or_default()
        .into_iter()
        .filter_map(|i| {
            usize::try_from(i)
                .inspect_err(|_| tracing::warn!(index = i, "negative matched input index in DB, skipping"))
                .ok()
        })
        .collect()
}

pub(crate) fn count_to_column(value: u64, field: &str) -> Result<i64, StorageError> {
    i64::try_from(value).map_err(|e| StorageError::corrupt(format!("{field} exceeds i64::MAX"), e))
}

fn count_from_column(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub(crate) fn row_to_campaign(row: &PgRow) -> Result<Campaign, StorageError> {
    Ok(Campaign {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_input(row: &PgRow) -> Result<NormalizedInput, StorageError> {
    let raw_type: String = row.try_get("input_type")?;
    let input_type: InputType = raw_type.parse().map_err(|e| {
        StorageError::corrupt(format!("unknown input_type {raw_type:?}"), e)
    })?;
    let index: i32 = row.try_get("input_index")?;
    let input_index = usize::try_from(index)
        .map_err(|e| StorageError::corrupt("negative input_index", e))?;
    Ok(NormalizedInput::new(
        row.try_get::<String, _>("input_id")?,
        input_type,
        row.try_get::<String, _>("original_url")?,
        input_index,
    ))
}

pub(crate) fn row_to_playlist(row: &PgRow) -> Result<Playlist, StorageError> {
    Ok(Playlist {
        id: row.try_get("result_id")?,
        name: row.try_get("name")?,
        curator: row.try_get("curator")?,
        followers: row.try_get::<Option<i64>, _>("followers")?.map(count_from_column),
        last_updated: row.try_get("last_updated")?,
        url: row.try_get("url")?,
        matched_inputs: matched_from_column(row.try_get("matched_inputs")?),
    })
}

fn parse_radio_category(raw: Option<&str>) -> Option<RadioCategory> {
    match raw? {
        "satellite" => Some(RadioCategory::Satellite),
        "terrestrial" => Some(RadioCategory::Terrestrial),
        other => {
            tracing::warn!(invalid_category = %other, "corrupt summary_category in DB, ignoring");
            None
        },
    }
}

pub(crate) fn row_to_radio(row: &PgRow) -> Result<RadioStation, StorageError> {
    Ok(RadioStation {
        id: row.try_get("result_id")?,
        name: row.try_get("name")?,
        market: row.try_get("market")?,
        country: row.try_get("country")?,
        plays: count_from_column(row.try_get("plays")?),
        last_played: row.try_get("last_played")?,
        url: row.try_get("url")?,
        summary_category: parse_radio_category(
            row.try_get::<Option<String>, _>("summary_category")?.as_deref(),
        ),
        matched_inputs: matched_from_column(row.try_get("matched_inputs")?),
    })
}

pub(crate) fn row_to_dj_event(row: &PgRow) -> Result<DjEvent, StorageError> {
    Ok(DjEvent {
        id: row.try_get("result_id")?,
        dj_name: row.try_get("dj_name")?,
        event_name: row.try_get("event_name")?,
        event_date: row.try_get("event_date")?,
        venue: row.try_get("venue")?,
        url: row.try_get("url")?,
        matched_inputs: matched_from_column(row.try_get("matched_inputs")?),
    })
}

pub(crate) fn row_to_article(row: &PgRow) -> Result<PressArticle, StorageError> {
    Ok(PressArticle {
        id: row.try_get("result_id")?,
        outlet: row.try_get("outlet")?,
        title: row.try_get("title")?,
        published_at: row.try_get("published_at")?,
        author: row.try_get("author")?,
        url: row.try_get("url")?,
        matched_inputs: matched_from_column(row.try_get("matched_inputs")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matched_inputs_store_as_null() {
        assert_eq!(matched_to_column(&MatchedInputs::new()).unwrap(), None);
    }

    #[test]
    fn matched_inputs_store_ascending() {
        let matched = MatchedInputs::from([4, 0, 2]);
        assert_eq!(matched_to_column(&matched).unwrap(), Some(vec![0, 2, 4]));
    }

    #[test]
    fn matched_inputs_load_skips_negatives_and_dupes() {
        let loaded = matched_from_column(Some(vec![3, -1, 0, 3]));
        assert_eq!(loaded.into_iter().collect::<Vec<_>>(), vec![0, 3]);
        assert!(matched_from_column(None).is_empty());
    }

    #[test]
    fn oversized_counts_are_rejected() {
        assert!(count_to_column(u64::MAX, "followers").is_err());
        assert_eq!(count_to_column(42, "plays").unwrap(), 42);
        assert_eq!(count_from_column(-5), 0);
    }

    #[test]
    fn radio_category_parses_known_values_only() {
        assert_eq!(parse_radio_category(Some("satellite")), Some(RadioCategory::Satellite));
        assert_eq!(parse_radio_category(Some("am")), None);
        assert_eq!(parse_radio_category(None), None);
    }
}
