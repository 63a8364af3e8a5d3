//! Provider endpoint paths.

/// Airplay provider: Spotify track id to ISRC.
pub const TRACK_LOOKUP: &str = "/tracks/lookup";
/// Airplay provider: radio plays, either per-play events or a summary.
pub const RADIO_AIRPLAY: &str = "/radio/airplay";
/// Airplay provider: DJ tracklists containing an ISRC.
pub const TRACKLIST_SEARCH: &str = "/tracklists/search";

/// Query for current Spotify playlists.
pub const PLAYLIST_QUERY: [(&str, &str); 2] = [("platform", "spotify"), ("status", "current")];

/// Playlist provider: map a Spotify id to the provider's native id.
///
/// `entity` is `track` or `artist`.
#[must_use]
pub fn resolve_spotify(entity: &str, spotify_id: &str) -> String {
    format!("/resolve/spotify/{entity}/{spotify_id}")
}

/// Playlist provider: playlists containing a track or an artist.
#[must_use]
pub fn playlists(entity: &str, native_id: &str) -> String {
    format!("/{entity}/{native_id}/playlists")
}
