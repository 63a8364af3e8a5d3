use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use campaign_scout_core::{
    Campaign, CampaignSubmission, CampaignWithResults, filter_flat, filter_results, flatten,
};
use campaign_scout_research::ResearchReport;
use chrono::Utc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{ListQuery, ResultsQuery};
use crate::response_types::ResultsResponse;

/// Research a submission and persist it. 201 once saved, 200 when the
/// results were computed but the write failed.
pub async fn submit_campaign(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<CampaignSubmission>,
) -> Result<(StatusCode, Json<ResearchReport>), ApiError> {
    let report = state.research.submit(&submission).await?;
    let status = if report.saved { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(report)))
}

pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let campaigns = state.research.list_campaigns(query.capped_limit()).await?;
    Ok(Json(campaigns))
}

pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CampaignWithResults>, ApiError> {
    let campaign = state.research.get_campaign(&id).await?;
    Ok(Json(campaign))
}

/// Stored results with the read-side filters applied.
pub async fn get_campaign_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let options = query.filter_options()?;
    let campaign = state.research.get_campaign(&id).await?;
    let now = Utc::now();

    let response = if query.flatten {
        ResultsResponse::Flat(filter_flat(&flatten(&campaign.results), &options, now))
    } else {
        ResultsResponse::Grouped(filter_results(&campaign.results, &options, now))
    };
    Ok(Json(response))
}
