//! Normalized reference inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Provider type a raw reference string was classified as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    SpotifyTrack,
    SpotifyArtist,
    SpotifyAlbum,
    TracklistsId,
    Youtube,
    Isrc,
}

impl InputType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::SpotifyTrack => "spotify_track",
            Self::SpotifyArtist => "spotify_artist",
            Self::SpotifyAlbum => "spotify_album",
            Self::TracklistsId => "tracklists_id",
            Self::Youtube => "youtube",
            Self::Isrc => "isrc",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spotify_track" => Ok(Self::SpotifyTrack),
            "spotify_artist" => Ok(Self::SpotifyArtist),
            "spotify_album" => Ok(Self::SpotifyAlbum),
            "tracklists_id" => Ok(Self::TracklistsId),
            "youtube" => Ok(Self::Youtube),
            "isrc" => Ok(Self::Isrc),
            other => Err(CoreError::InvalidInputType(other.to_owned())),
        }
    }
}

/// A user-entered reference reduced to provider type, canonical id and
/// its position in the submitted list.
///
/// `input_index` is the join key between results and the "#N" badges shown
/// to the user; it is the position in the raw list, blanks included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedInput {
    pub id: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub original_url: String,
    pub input_index: usize,
}

impl NormalizedInput {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        input_type: InputType,
        original_url: impl Into<String>,
        input_index: usize,
    ) -> Self {
        Self { id: id.into(), input_type, original_url: original_url.into(), input_index }
    }

    /// One-based badge label as shown next to results.
    #[must_use]
    pub fn badge(&self) -> String {
        format!("#{}", self.input_index.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_round_trips_through_str() {
        for ty in [
            InputType::SpotifyTrack,
            InputType::SpotifyArtist,
            InputType::SpotifyAlbum,
            InputType::TracklistsId,
            InputType::Youtube,
            InputType::Isrc,
        ] {
            assert_eq!(ty.as_str().parse::<InputType>().unwrap(), ty);
        }
    }

    #[test]
    fn serializes_type_field_name() {
        let input = NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 2);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "isrc");
        assert_eq!(json["input_index"], 2);
    }

    #[test]
    fn badge_is_one_based() {
        let input = NormalizedInput::new("x", InputType::Youtube, "u", 0);
        assert_eq!(input.badge(), "#1");
    }
}
