//! Radio vertical: stations that played the referenced recordings.

use campaign_scout_core::{
    InputType, NormalizedInput, RadioCategory, RadioStation, ResultMap, VerticalResult,
};
use campaign_scout_providers::{ProviderClient, ProviderError, endpoints};
use serde_json::Value;

use crate::fetch::{VerticalFetch, json_date, json_str, json_u64};

/// Query airplay for each ISRC (Spotify tracks are resolved to one first).
///
/// Play-event responses merge by station across inputs. Summary-only
/// responses produce `satellite-<input>` / `terrestrial-<input>` entries that
/// accumulate for the same input but never merge across inputs.
pub async fn fetch(client: &ProviderClient, inputs: &[NormalizedInput]) -> VerticalFetch {
    let mut out = VerticalFetch::default();
    let mut stations: ResultMap<RadioStation> = ResultMap::new();

    for input in inputs {
        if !matches!(input.input_type, InputType::Isrc | InputType::SpotifyTrack) {
            continue;
        }
        out.attempted += 1;

        match fetch_one(client, input, &mut stations).await {
            Ok(true) => out.succeeded += 1,
            Ok(false) => {},
            Err(e) if e.is_unavailable() => {
                tracing::warn!(error = %e, "airplay provider unavailable, stopping radio fetch");
                out.provider_unavailable = true;
                out.warn(format!("Radio airplay unavailable: {e}"));
                break;
            },
            Err(e) => {
                tracing::warn!(input = %input.badge(), error = %e, "airplay lookup failed");
                out.warn(format!("Radio: no data for input {}", input.badge()));
            },
        }
    }

    out.results = stations.into_vec().into_iter().map(VerticalResult::Radio).collect();
    tracing::debug!(
        attempted = out.attempted,
        succeeded = out.succeeded,
        results = out.results.len(),
        "radio fetch complete"
    );
    out
}

async fn resolve_isrc(
    client: &ProviderClient,
    input: &NormalizedInput,
) -> Result<Option<String>, ProviderError> {
    if input.input_type == InputType::Isrc {
        return Ok(Some(input.id.clone()));
    }
    let body = client
        .get(endpoints::TRACK_LOOKUP, &[("spotify_track_id", input.id.as_str())])
        .await?;
    Ok(json_str(&body, "isrc"))
}

async fn fetch_one(
    client: &ProviderClient,
    input: &NormalizedInput,
    stations: &mut ResultMap<RadioStation>,
) -> Result<bool, ProviderError> {
    let Some(isrc) = resolve_isrc(client, input).await? else {
        tracing::debug!(input = %input.badge(), "no ISRC for track");
        return Ok(false);
    };

    let body = client.get(endpoints::RADIO_AIRPLAY, &[("isrc", isrc.as_str())]).await?;
    if let Some(plays) = body.get("plays").and_then(Value::as_array) {
        merge_plays(plays, input.input_index, stations);
        return Ok(true);
    }
    if let Some(summary) = body.get("summary").filter(|s| s.is_object()) {
        merge_summary(summary, input.input_index, stations);
        return Ok(true);
    }
    tracing::warn!(input = %input.badge(), "malformed airplay payload");
    Ok(false)
}

pub(crate) fn merge_plays(
    plays: &[Value],
    input_index: usize,
    stations: &mut ResultMap<RadioStation>,
) {
    for play in plays {
        let key = json_str(play, "station_id")
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let played_at = json_date(play, "played_at");
        stations.upsert(
            &key,
            input_index,
            || RadioStation {
                id: key.clone(),
                name: json_str(play, "station_name").unwrap_or_else(|| "Unknown station".to_owned()),
                market: json_str(play, "market"),
                country: json_str(play, "country"),
                plays: 1,
                last_played: played_at,
                url: json_str(play, "url"),
                summary_category: None,
                matched_inputs: Default::default(),
            },
            |existing| {
                existing.plays = existing.plays.saturating_add(1);
                if let Some(at) = played_at {
                    if existing.last_played.is_none_or(|prev| at > prev) {
                        existing.last_played = Some(at);
                    }
                }
            },
        );
    }
}

pub(crate) fn merge_summary(
    summary: &Value,
    input_index: usize,
    stations: &mut ResultMap<RadioStation>,
) {
    let total = json_u64(summary, "total_plays").unwrap_or(0);
    let satellite = json_u64(summary, "satellite_plays").unwrap_or(0).min(total);
    let terrestrial = total - satellite;

    for (category, plays, name) in [
        (RadioCategory::Satellite, satellite, "Satellite radio"),
        (RadioCategory::Terrestrial, terrestrial, "Terrestrial radio"),
    ] {
        if plays == 0 {
            continue;
        }
        let key = format!("{}-{input_index}", category.as_str());
        stations.upsert(
            &key,
            input_index,
            || RadioStation {
                id: key.clone(),
                name: name.to_owned(),
                market: None,
                country: None,
                plays,
                last_played: None,
                url: None,
                summary_category: Some(category),
                matched_inputs: Default::default(),
            },
            |existing| existing.plays = existing.plays.saturating_add(plays),
        );
    }
}
