//! Per-vertical result records.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vertical::Vertical;

/// Input positions that led to a result. Ordered so rendering is stable.
pub type MatchedInputs = BTreeSet<usize>;

/// A streaming-service playlist containing one of the references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub curator: Option<String>,
    pub followers: Option<u64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub matched_inputs: MatchedInputs,
}

/// Summary bucket for radio providers that only report aggregate counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RadioCategory {
    Satellite,
    Terrestrial,
}

impl RadioCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Satellite => "satellite",
            Self::Terrestrial => "terrestrial",
        }
    }
}

/// A radio station that played one of the references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RadioStation {
    pub id: String,
    pub name: String,
    pub market: Option<String>,
    pub country: Option<String>,
    pub plays: u64,
    pub last_played: Option<DateTime<Utc>>,
    pub url: Option<String>,
    /// Set only for entries synthesized from a summary-only response.
    pub summary_category: Option<RadioCategory>,
    pub matched_inputs: MatchedInputs,
}

/// A DJ set or live event where one of the references was played.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DjEvent {
    pub id: String,
    pub dj_name: String,
    pub event_name: String,
    pub event_date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub url: Option<String>,
    pub matched_inputs: MatchedInputs,
}

/// A press article mentioning one of the references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PressArticle {
    pub id: String,
    pub outlet: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub matched_inputs: MatchedInputs,
}

/// A single research hit, tagged with its vertical at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "vertical", rename_all = "lowercase")]
pub enum VerticalResult {
    Dsp(Playlist),
    Radio(RadioStation),
    Dj(DjEvent),
    Press(PressArticle),
}

impl VerticalResult {
    #[must_use]
    pub const fn vertical(&self) -> Vertical {
        match *self {
            Self::Dsp(_) => Vertical::Dsp,
            Self::Radio(_) => Vertical::Radio,
            Self::Dj(_) => Vertical::Dj,
            Self::Press(_) => Vertical::Press,
        }
    }

    /// Dedup key within the vertical.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Dsp(p) => &p.id,
            Self::Radio(r) => &r.id,
            Self::Dj(d) => &d.id,
            Self::Press(a) => &a.id,
        }
    }

    #[must_use]
    pub fn matched_inputs(&self) -> &MatchedInputs {
        match self {
            Self::Dsp(p) => &p.matched_inputs,
            Self::Radio(r) => &r.matched_inputs,
            Self::Dj(d) => &d.matched_inputs,
            Self::Press(a) => &a.matched_inputs,
        }
    }

    /// The vertical-appropriate date: last update, last spin, event date or
    /// publication date.
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Dsp(p) => p.last_updated,
            Self::Radio(r) => r.last_played,
            Self::Dj(d) => d.event_date,
            Self::Press(a) => a.published_at,
        }
    }

    /// Follower count for entries that carry one. Only playlists do; a
    /// playlist without a reported count is treated as zero followers.
    #[must_use]
    pub fn follower_count(&self) -> Option<u64> {
        match self {
            Self::Dsp(p) => Some(p.followers.unwrap_or(0)),
            Self::Radio(_) | Self::Dj(_) | Self::Press(_) => None,
        }
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Dsp(p) => p.url.as_deref(),
            Self::Radio(r) => r.url.as_deref(),
            Self::Dj(d) => d.url.as_deref(),
            Self::Press(a) => a.url.as_deref(),
        }
    }
}

/// One aggregated, deduplicated list per vertical.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchResults {
    pub dsp_results: Vec<Playlist>,
    pub radio_results: Vec<RadioStation>,
    pub dj_results: Vec<DjEvent>,
    pub press_results: Vec<PressArticle>,
}

impl ResearchResults {
    #[must_use]
    pub fn total(&self) -> usize {
        self.dsp_results.len()
            + self.radio_results.len()
            + self.dj_results.len()
            + self.press_results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    #[must_use]
    pub fn count_for(&self, vertical: Vertical) -> usize {
        match vertical {
            Vertical::Dsp => self.dsp_results.len(),
            Vertical::Radio => self.radio_results.len(),
            Vertical::Dj => self.dj_results.len(),
            Vertical::Press => self.press_results.len(),
        }
    }

    /// Results of one vertical as tagged entries.
    #[must_use]
    pub fn vertical_results(&self, vertical: Vertical) -> Vec<VerticalResult> {
        match vertical {
            Vertical::Dsp => self.dsp_results.iter().cloned().map(VerticalResult::Dsp).collect(),
            Vertical::Radio => {
                self.radio_results.iter().cloned().map(VerticalResult::Radio).collect()
            },
            Vertical::Dj => self.dj_results.iter().cloned().map(VerticalResult::Dj).collect(),
            Vertical::Press => {
                self.press_results.iter().cloned().map(VerticalResult::Press).collect()
            },
        }
    }

    /// Rebuild from tagged entries, routing each to its vertical's list.
    #[must_use]
    pub fn from_tagged<I: IntoIterator<Item = VerticalResult>>(entries: I) -> Self {
        let mut results = Self::default();
        for entry in entries {
            match entry {
                VerticalResult::Dsp(p) => results.dsp_results.push(p),
                VerticalResult::Radio(r) => results.radio_results.push(r),
                VerticalResult::Dj(d) => results.dj_results.push(d),
                VerticalResult::Press(a) => results.press_results.push(a),
            }
        }
        results
    }
}

/// Parse the date formats providers return: RFC 3339, `YYYY-MM-DD HH:MM:SS`
/// (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
#[must_use]
pub fn parse_provider_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn playlist(followers: Option<u64>) -> Playlist {
        Playlist {
            id: "pl1".to_owned(),
            name: "New Music Friday".to_owned(),
            curator: Some("Spotify".to_owned()),
            followers,
            last_updated: None,
            url: None,
            matched_inputs: MatchedInputs::from([0]),
        }
    }

    #[test]
    fn tagged_serialization_carries_vertical() {
        let json = serde_json::to_value(VerticalResult::Dsp(playlist(Some(10)))).unwrap();
        assert_eq!(json["vertical"], "dsp");
        assert_eq!(json["id"], "pl1");
        assert_eq!(json["matched_inputs"], serde_json::json!([0]));
    }

    #[test]
    fn missing_followers_count_as_zero_for_playlists() {
        assert_eq!(VerticalResult::Dsp(playlist(None)).follower_count(), Some(0));
    }

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        let dt = parse_provider_date("2025-05-01T12:30:00Z").unwrap();
        assert_eq!((dt.month(), dt.hour()), (5, 12));

        let d = parse_provider_date("2025-05-01").unwrap();
        assert_eq!((d.day(), d.hour()), (1, 0));

        let s = parse_provider_date("2025-05-01 08:15:00").unwrap();
        assert_eq!(s.minute(), 15);
    }

    #[test]
    fn unparseable_dates_are_none() {
        assert!(parse_provider_date("").is_none());
        assert!(parse_provider_date("last tuesday").is_none());
    }

    #[test]
    fn from_tagged_routes_by_vertical() {
        let results = ResearchResults::from_tagged(vec![VerticalResult::Dsp(playlist(None))]);
        assert_eq!(results.dsp_results.len(), 1);
        assert_eq!(results.total(), 1);
        assert_eq!(results.count_for(Vertical::Radio), 0);
    }
}
