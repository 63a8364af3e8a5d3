//! Storage layer for campaign-scout
//!
//! PostgreSQL persistence for campaigns, their normalized reference inputs
//! and one table per research vertical, plus an in-process store for running
//! without a database.

pub mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
pub use traits::CampaignStore;
