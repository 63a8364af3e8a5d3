//! DSP vertical: playlists containing the referenced tracks or artists.

use campaign_scout_core::{InputType, NormalizedInput, Playlist, ResultMap, VerticalResult};
use campaign_scout_providers::{ProviderClient, ProviderError, endpoints};

use crate::fetch::{VerticalFetch, json_date, json_str, json_u64};

const NO_QUERY: &[(&str, &str)] = &[];

fn entity_for(input: &NormalizedInput) -> Option<&'static str> {
    match input.input_type {
        InputType::SpotifyTrack => Some("track"),
        InputType::SpotifyArtist => Some("artist"),
        InputType::SpotifyAlbum
        | InputType::TracklistsId
        | InputType::Youtube
        | InputType::Isrc => None,
    }
}

/// Resolve each Spotify track/artist to the provider's id, then collect the
/// current Spotify playlists it appears on.
pub async fn fetch(client: &ProviderClient, inputs: &[NormalizedInput]) -> VerticalFetch {
    let mut out = VerticalFetch::default();
    let mut playlists: ResultMap<Playlist> = ResultMap::new();

    for input in inputs {
        let Some(entity) = entity_for(input) else {
            continue;
        };
        out.attempted += 1;

        match fetch_one(client, entity, input, &mut playlists).await {
            Ok(true) => out.succeeded += 1,
            Ok(false) => {},
            Err(e) if e.is_unavailable() => {
                tracing::warn!(error = %e, "playlist provider unavailable, stopping DSP fetch");
                out.provider_unavailable = true;
                out.warn(format!("DSP playlists unavailable: {e}"));
                break;
            },
            Err(e) => {
                tracing::warn!(input = %input.badge(), error = %e, "playlist lookup failed");
                out.warn(format!("DSP playlists: no data for input {}", input.badge()));
            },
        }
    }

    out.results = playlists.into_vec().into_iter().map(VerticalResult::Dsp).collect();
    tracing::debug!(
        attempted = out.attempted,
        succeeded = out.succeeded,
        results = out.results.len(),
        "DSP fetch complete"
    );
    out
}

/// Returns `Ok(false)` when the provider answered but the payload was unusable.
async fn fetch_one(
    client: &ProviderClient,
    entity: &str,
    input: &NormalizedInput,
    playlists: &mut ResultMap<Playlist>,
) -> Result<bool, ProviderError> {
    let resolved = client.get(&endpoints::resolve_spotify(entity, &input.id), NO_QUERY).await?;
    let Some(native_id) = json_str(&resolved, "id") else {
        tracing::debug!(input = %input.badge(), "resolve returned no native id");
        return Ok(false);
    };

    let body = client
        .get(&endpoints::playlists(entity, &native_id), endpoints::PLAYLIST_QUERY.as_slice())
        .await?;
    let Some(entries) = body.get("playlists").and_then(serde_json::Value::as_array) else {
        tracing::warn!(input = %input.badge(), "malformed playlists payload");
        return Ok(false);
    };

    for entry in entries {
        let Some(id) = json_str(entry, "id") else {
            continue;
        };
        playlists.upsert(
            &id,
            input.input_index,
            || Playlist {
                id: id.clone(),
                name: json_str(entry, "name").unwrap_or_else(|| "Untitled playlist".to_owned()),
                curator: json_str(entry, "curator"),
                followers: json_u64(entry, "followers"),
                last_updated: json_date(entry, "last_updated"),
                url: json_str(entry, "url"),
                matched_inputs: Default::default(),
            },
            |existing| {
                if existing.followers.is_none() {
                    existing.followers = json_u64(entry, "followers");
                }
                if let Some(updated) = json_date(entry, "last_updated") {
                    if existing.last_updated.is_none_or(|prev| updated > prev) {
                        existing.last_updated = Some(updated);
                    }
                }
            },
        );
    }
    Ok(true)
}
