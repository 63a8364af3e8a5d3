//! Core types and pure logic for campaign-scout
//!
//! Domain types shared across all other crates, plus the synchronous parts of
//! the research pipeline: input normalization, merge-by-key aggregation and
//! the read-side filter engine.

pub mod aggregate;
mod campaign;
pub mod constants;
mod env_config;
mod error;
pub mod filter;
mod input;
pub mod normalize;
mod results;
mod submission;
mod vertical;

pub use aggregate::{Keyed, ResultMap, flatten};
pub use campaign::*;
pub use constants::*;
pub use env_config::env_parse_with_default;
pub use error::*;
pub use filter::{FilterOptions, filter_flat, filter_results};
pub use input::*;
pub use normalize::normalize;
pub use results::*;
pub use submission::*;
pub use vertical::*;
