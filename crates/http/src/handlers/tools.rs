use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campaign_scout_core::{NormalizedInput, normalize};
use campaign_scout_providers::ProviderKind;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{NormalizeRequest, RelayRequest};
use crate::response_types::{ProviderStatus, ProvidersStatusResponse};

pub async fn normalize_inputs(Json(req): Json<NormalizeRequest>) -> Json<Vec<NormalizedInput>> {
    Json(normalize(req.inputs.as_slice()))
}

/// Forward a GET to one provider and hand its JSON back unchanged.
///
/// Provider failures keep the provider's status code; the body is a small
/// `{"error", "status", "details"}` object.
pub async fn relay(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RelayRequest>,
) -> Result<Response, ApiError> {
    let kind: ProviderKind = req.provider.parse().map_err(ApiError::BadRequest)?;
    let mut params: Vec<(String, String)> = req.params.into_iter().collect();
    params.sort();

    match state.research.providers().relay(kind, &req.path, &params).await {
        Ok(body) => Ok(Json(body).into_response()),
        Err(e) => {
            tracing::warn!(provider = %kind, path = %req.path, error = %e, "relay failed");
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((status, Json(e.relay_body())).into_response())
        },
    }
}

pub async fn providers_status(State(state): State<Arc<AppState>>) -> Json<ProvidersStatusResponse> {
    let providers = state.research.providers();
    let providers = [ProviderKind::Playlist, ProviderKind::Airplay]
        .into_iter()
        .map(|kind| {
            let client = providers.get(kind);
            ProviderStatus {
                provider: kind,
                configured: client.is_configured(),
                base_url: client.base_url().to_owned(),
            }
        })
        .collect();
    Json(ProvidersStatusResponse { providers, storage: state.research.has_store() })
}
