//! HTTP API server for campaign-scout.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_copy_implementations, reason = "Types may grow")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

#[cfg(test)]
mod router_tests;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use campaign_scout_research::ResearchService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use response_types::{ProviderStatus, ProvidersStatusResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Research pipeline plus optional campaign storage.
    pub research: Arc<ResearchService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(
            "/api/campaigns",
            get(handlers::campaigns::list_campaigns).post(handlers::campaigns::submit_campaign),
        )
        .route("/api/campaigns/{id}", get(handlers::campaigns::get_campaign))
        .route("/api/campaigns/{id}/results", get(handlers::campaigns::get_campaign_results))
        .route("/api/normalize", post(handlers::tools::normalize_inputs))
        .route("/api/relay", post(handlers::tools::relay))
        .route("/api/providers/status", get(handlers::tools::providers_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION").to_owned() })
}
