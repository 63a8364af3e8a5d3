//! Campaign submission and its pre-flight validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_REFERENCE_INPUTS;
use crate::error::CoreError;
use crate::vertical::Vertical;

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static STRICT_SPOTIFY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://open\.spotify\.com/(?:track|artist|album)/[A-Za-z0-9]{22}(?:\?\S*)?$")
        .unwrap()
});

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static STRICT_ISRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{3}[0-9]{7}$").unwrap());

/// Strict per-field check run before a submission is accepted.
///
/// Stricter than the normalizer: the whole field must be a full Spotify URL
/// or a bare ISRC.
#[must_use]
pub fn validate_reference_input(raw: &str) -> bool {
    let text = raw.trim();
    STRICT_SPOTIFY_REGEX.is_match(text) || STRICT_ISRC_REGEX.is_match(text)
}

/// A research request as entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignSubmission {
    pub campaign_name: String,
    /// Up to ten slots; blank slots are allowed and keep their position.
    #[serde(default)]
    pub reference_inputs: Vec<String>,
    #[serde(default)]
    pub selected_verticals: Vec<Vertical>,
}

impl CampaignSubmission {
    /// Reject submissions the form would block.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.campaign_name.trim().is_empty() {
            return Err(CoreError::InvalidSubmission("campaign name must not be blank".to_owned()));
        }
        if self.reference_inputs.len() > MAX_REFERENCE_INPUTS {
            return Err(CoreError::InvalidSubmission(format!(
                "at most {MAX_REFERENCE_INPUTS} reference inputs are allowed"
            )));
        }
        if self.reference_inputs.iter().all(|s| s.trim().is_empty()) {
            return Err(CoreError::InvalidSubmission(
                "at least one reference input is required".to_owned(),
            ));
        }
        if let Some((pos, bad)) = self
            .reference_inputs
            .iter()
            .enumerate()
            .find(|(_, s)| !s.trim().is_empty() && !validate_reference_input(s))
        {
            return Err(CoreError::InvalidSubmission(format!(
                "reference input #{} is not a Spotify URL or ISRC: {}",
                pos.saturating_add(1),
                bad.trim()
            )));
        }
        if self.selected_verticals.is_empty() {
            return Err(CoreError::InvalidSubmission(
                "select at least one vertical".to_owned(),
            ));
        }
        Ok(())
    }

    /// Selected verticals with duplicates removed, in priority order.
    #[must_use]
    pub fn verticals(&self) -> Vec<Vertical> {
        Vertical::ALL.into_iter().filter(|v| self.selected_verticals.contains(v)).collect()
    }
}
