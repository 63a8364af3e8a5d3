//! Press vertical. There is no live press provider; results are always
//! sample articles tied to the submission's inputs.

use campaign_scout_core::{NormalizedInput, VerticalResult};
use chrono::Utc;
use rand::Rng;

use crate::fallback;
use crate::fetch::VerticalFetch;

pub fn fetch<R: Rng + ?Sized>(inputs: &[NormalizedInput], rng: &mut R) -> VerticalFetch {
    let results: Vec<VerticalResult> = fallback::press_articles(inputs, Utc::now(), rng)
        .into_iter()
        .filter(|a| !a.matched_inputs.is_empty())
        .map(VerticalResult::Press)
        .collect();
    tracing::debug!(results = results.len(), "press sample data generated");
    VerticalFetch { results, used_fallback: true, ..VerticalFetch::default() }
}
