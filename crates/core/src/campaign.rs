use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::NormalizedInput;
use crate::results::ResearchResults;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A stored campaign with its inputs and every vertical's results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignWithResults {
    pub campaign: Campaign,
    pub inputs: Vec<NormalizedInput>,
    pub results: ResearchResults,
}
