//! Read-side filter engine.
//!
//! Pure functions over aggregated results. Filters combine with AND semantics
//! and never touch their input, so reapplying them is idempotent.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::RECENT_WINDOW_DAYS;
use crate::results::{ResearchResults, VerticalResult};
use crate::vertical::Vertical;

/// User-selected filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    /// Keep only entries dated strictly after `now - 30 days`.
    #[serde(default)]
    pub recent_only: bool,
    /// Minimum follower count; only applies to playlists.
    #[serde(default)]
    pub min_followers: u64,
    /// Allowed verticals; empty means no restriction.
    #[serde(default)]
    pub verticals: HashSet<Vertical>,
}

impl FilterOptions {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.recent_only && self.min_followers == 0 && self.verticals.is_empty()
    }

    fn allows_vertical(&self, vertical: Vertical) -> bool {
        self.verticals.is_empty() || self.verticals.contains(&vertical)
    }

    /// Whether a single entry passes every active filter.
    #[must_use]
    pub fn matches(&self, entry: &VerticalResult, now: DateTime<Utc>) -> bool {
        if !self.allows_vertical(entry.vertical()) {
            return false;
        }

        if self.recent_only {
            let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
            match entry.date() {
                Some(date) if date > cutoff => {},
                _ => return false,
            }
        }

        match entry.follower_count() {
            Some(followers) => followers >= self.min_followers,
            None => true,
        }
    }
}

/// Filter a flat, tagged result list.
#[must_use]
pub fn filter_flat(
    entries: &[VerticalResult],
    options: &FilterOptions,
    now: DateTime<Utc>,
) -> Vec<VerticalResult> {
    entries.iter().filter(|e| options.matches(e, now)).cloned().collect()
}

/// Filter per-vertical results, keeping each vertical's order.
#[must_use]
pub fn filter_results(
    results: &ResearchResults,
    options: &FilterOptions,
    now: DateTime<Utc>,
) -> ResearchResults {
    if options.is_noop() {
        return results.clone();
    }
    let kept = Vertical::ALL
        .iter()
        .filter(|v| options.allows_vertical(**v))
        .flat_map(|v| results.vertical_results(*v))
        .filter(|e| options.matches(e, now));
    ResearchResults::from_tagged(kept)
}
