//! Request/query types (Deserialize)

use std::collections::HashMap;

use campaign_scout_core::{
    DEFAULT_CAMPAIGN_LIST_LIMIT, FilterOptions, MAX_CAMPAIGN_LIST_LIMIT, parse_vertical_list,
};
use serde::Deserialize;

use crate::api_error::ApiError;

const fn default_limit() -> usize {
    DEFAULT_CAMPAIGN_LIST_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl ListQuery {
    pub fn capped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_CAMPAIGN_LIST_LIMIT)
    }
}

/// `?recent_only=true&min_followers=1000&verticals=dsp,radio&flatten=true`
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub recent_only: bool,
    #[serde(default)]
    pub min_followers: u64,
    pub verticals: Option<String>,
    #[serde(default)]
    pub flatten: bool,
}

impl ResultsQuery {
    pub fn filter_options(&self) -> Result<FilterOptions, ApiError> {
        let verticals = match self.verticals.as_deref() {
            Some(raw) => parse_vertical_list(raw).map_err(|e| ApiError::BadRequest(e.to_string()))?,
            None => Vec::new(),
        };
        Ok(FilterOptions {
            recent_only: self.recent_only,
            min_followers: self.min_followers,
            verticals: verticals.into_iter().collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub inputs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub provider: String,
    pub path: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}
