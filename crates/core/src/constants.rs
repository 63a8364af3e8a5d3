//! Shared constants for campaign-scout.
//!
//! Centralizes limits and defaults used by more than one crate.

/// Number of reference input slots a submission may carry.
pub const MAX_REFERENCE_INPUTS: usize = 10;

/// Window used by the `recent_only` filter.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Default timeout for a single outbound provider call.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Default number of attempts (first call included) for retryable provider calls.
pub const DEFAULT_PROVIDER_MAX_ATTEMPTS: u32 = 3;

/// Default base delay for linear retry backoff (`attempt × delay`).
pub const DEFAULT_PROVIDER_RETRY_DELAY_MS: u64 = 1000;

/// Maximum number of campaigns returned by a listing query.
pub const MAX_CAMPAIGN_LIST_LIMIT: usize = 200;

/// Default number of campaigns returned when the caller gives no limit.
pub const DEFAULT_CAMPAIGN_LIST_LIMIT: usize = 20;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Notice shown when live providers returned nothing and the airplay key is missing.
pub const PROVIDER_NOT_CONFIGURED_NOTICE: &str =
    "Research provider not configured (SCOUT_AIRPLAY_API_KEY not set); showing sample data";

/// Notice shown when live providers are configured but matched nothing.
pub const NO_MATCHES_NOTICE: &str = "No live matches found for these references; showing sample data";

/// Sample data is dated within this many days before "now".
pub const FALLBACK_WINDOW_DAYS: i64 = 60;
