//! Input normalizer: raw reference strings → typed, indexed inputs.
//!
//! Classification is purely pattern based and ordered; the first pattern that
//! matches decides the type. Strings that match nothing are dropped without
//! being reported, since per-field feedback happens before submission.

use std::sync::LazyLock;

use regex::Regex;

use crate::input::{InputType, NormalizedInput};

/// ISRC: two letters, three alphanumerics, seven digits. Uppercase only.
#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static ISRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}[A-Z0-9]{3}[0-9]{7}$").unwrap());

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static SPOTIFY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"open\.spotify\.com/(?:intl-[A-Za-z-]+/)?(track|artist|album)/([A-Za-z0-9]{22})(?:[?#/]|$)",
    )
    .unwrap()
});

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TRACKLISTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[/.])1001tracklists\.com/(?:track|tracklist)/([A-Za-z0-9]+)").unwrap()
});

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static YOUTUBE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[/.])youtube\.com/watch\?(?:[^#\s]*&)?v=([A-Za-z0-9_-]{11})").unwrap()
});

/// Classify a single trimmed reference string.
///
/// Returns the input type and the provider-native identifier, or `None` when
/// no known pattern matches.
#[must_use]
pub fn classify(text: &str) -> Option<(InputType, String)> {
    if ISRC_REGEX.is_match(text) {
        return Some((InputType::Isrc, text.to_owned()));
    }

    if let Some(caps) = SPOTIFY_REGEX.captures(text) {
        let kind = match caps.get(1).map(|m| m.as_str()) {
            Some("track") => InputType::SpotifyTrack,
            Some("artist") => InputType::SpotifyArtist,
            _ => InputType::SpotifyAlbum,
        };
        return caps.get(2).map(|id| (kind, id.as_str().to_owned()));
    }

    if let Some(id) = TRACKLISTS_REGEX.captures(text).and_then(|c| c.get(1)) {
        return Some((InputType::TracklistsId, id.as_str().to_owned()));
    }

    if let Some(id) = YOUTUBE_REGEX.captures(text).and_then(|c| c.get(1)) {
        return Some((InputType::Youtube, id.as_str().to_owned()));
    }

    None
}

/// Normalize an ordered list of raw reference strings.
///
/// Blank entries are skipped but still consume a position, so every output's
/// `input_index` is its position in `raw`, not in the filtered output.
pub fn normalize<S: AsRef<str>>(raw: &[S]) -> Vec<NormalizedInput> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let text = entry.as_ref().trim();
            if text.is_empty() {
                return None;
            }
            match classify(text) {
                Some((input_type, id)) => Some(NormalizedInput::new(id, input_type, text, index)),
                None => {
                    tracing::debug!(input_index = index, "reference matched no known pattern, dropped");
                    None
                },
            }
        })
        .collect()
}
