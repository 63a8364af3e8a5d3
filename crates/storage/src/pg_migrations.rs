//! PostgreSQL schema migrations for campaign-scout storage.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_campaigns_created ON campaigns (created_at DESC)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reference_inputs (
            id BIGSERIAL PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            input_id TEXT NOT NULL,
            input_type TEXT NOT NULL,
            original_url TEXT NOT NULL,
            input_index INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dsp_results (
            id BIGSERIAL PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            vertical TEXT NOT NULL DEFAULT 'dsp',
            result_id TEXT NOT NULL,
            name TEXT NOT NULL,
            curator TEXT,
            followers BIGINT,
            last_updated TIMESTAMPTZ,
            url TEXT,
            matched_inputs INTEGER[]
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS radio_results (
            id BIGSERIAL PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            vertical TEXT NOT NULL DEFAULT 'radio',
            result_id TEXT NOT NULL,
            name TEXT NOT NULL,
            market TEXT,
            country TEXT,
            plays BIGINT NOT NULL DEFAULT 0,
            last_played TIMESTAMPTZ,
            url TEXT,
            summary_category TEXT,
            matched_inputs INTEGER[]
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dj_results (
            id BIGSERIAL PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            vertical TEXT NOT NULL DEFAULT 'dj',
            result_id TEXT NOT NULL,
            dj_name TEXT NOT NULL,
            event_name TEXT NOT NULL,
            event_date TIMESTAMPTZ,
            venue TEXT,
            url TEXT,
            matched_inputs INTEGER[]
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS press_results (
            id BIGSERIAL PRIMARY KEY,
            campaign_id TEXT NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            vertical TEXT NOT NULL DEFAULT 'press',
            result_id TEXT NOT NULL,
            outlet TEXT NOT NULL,
            title TEXT NOT NULL,
            published_at TIMESTAMPTZ,
            author TEXT,
            url TEXT,
            matched_inputs INTEGER[]
        )
        "#,
    )
    .execute(pool)
    .await?;

    for table in ["reference_inputs", "dsp_results", "radio_results", "dj_results", "press_results"]
    {
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_campaign ON {table} (campaign_id, id)"
        ))
        .execute(pool)
        .await?;
    }

    tracing::info!("PostgreSQL migrations completed");
    Ok(())
}
