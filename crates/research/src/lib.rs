//! Research layer for campaign-scout
//!
//! Per-vertical fetchers against the external providers, the sample-data
//! generator, and `ResearchService`, which fans a submission out to the
//! selected verticals and writes the outcome through to storage.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::arithmetic_side_effects, reason = "Counters are bounded by input count")]

pub mod dj;
pub mod dsp;
mod error;
pub mod fallback;
mod fetch;
pub mod press;
pub mod radio;
mod research_service;


pub use error::ServiceError;
pub use fetch::{Notice, NoticeLevel, VerticalFetch};
pub use research_service::{ResearchReport, ResearchService};
