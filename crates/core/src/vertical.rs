//! Research verticals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the four research categories a campaign can cover.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    /// Streaming-service playlists
    Dsp,
    /// Radio airplay
    Radio,
    /// DJ sets and live events
    Dj,
    /// Press coverage
    Press,
}

impl Vertical {
    /// All verticals in "show all" priority order.
    pub const ALL: [Self; 4] = [Self::Dsp, Self::Radio, Self::Dj, Self::Press];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Dsp => "dsp",
            Self::Radio => "radio",
            Self::Dj => "dj",
            Self::Press => "press",
        }
    }

    /// Human-readable label used in notices and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match *self {
            Self::Dsp => "DSP playlists",
            Self::Radio => "Radio",
            Self::Dj => "DJ sets",
            Self::Press => "Press",
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vertical {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dsp" => Ok(Self::Dsp),
            "radio" => Ok(Self::Radio),
            "dj" => Ok(Self::Dj),
            "press" => Ok(Self::Press),
            other => Err(CoreError::InvalidVertical(other.to_owned())),
        }
    }
}

/// Parse a comma-separated vertical list such as `"dsp,radio"`.
///
/// Blank segments are skipped; an unknown name fails the whole list.
pub fn parse_vertical_list(raw: &str) -> Result<Vec<Vertical>, CoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Vertical::from_str)
        .collect()
}
