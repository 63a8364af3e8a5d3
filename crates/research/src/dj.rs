//! DJ vertical: tracklists from sets and events that included the ISRCs.

use campaign_scout_core::{DjEvent, InputType, NormalizedInput, ResultMap, VerticalResult};
use campaign_scout_providers::{ProviderClient, ProviderError, endpoints};
use chrono::Utc;
use rand::Rng;
use serde_json::Value;

use crate::fallback;
use crate::fetch::{VerticalFetch, json_date, json_str};

/// Search tracklists for each ISRC input.
///
/// Falls back to sample data when no call succeeded or nothing matched.
pub async fn fetch<R>(client: &ProviderClient, inputs: &[NormalizedInput], rng: &mut R) -> VerticalFetch
where
    R: Rng + Send + ?Sized,
{
    let mut out = VerticalFetch::default();
    let mut events: ResultMap<DjEvent> = ResultMap::new();

    for input in inputs.iter().filter(|i| i.input_type == InputType::Isrc) {
        out.attempted += 1;
        match fetch_one(client, input, &mut events).await {
            Ok(true) => out.succeeded += 1,
            Ok(false) => {},
            Err(e) if e.is_unavailable() => {
                tracing::warn!(error = %e, "tracklist provider unavailable, stopping DJ fetch");
                out.provider_unavailable = true;
                break;
            },
            Err(e) => {
                tracing::warn!(input = %input.badge(), error = %e, "tracklist search failed");
            },
        }
    }

    if out.succeeded == 0 || events.is_empty() {
        tracing::info!(
            attempted = out.attempted,
            succeeded = out.succeeded,
            "no live DJ results, using sample data"
        );
        out.used_fallback = true;
        out.results = fallback::dj_events(inputs, Utc::now(), rng)
            .into_iter()
            .map(VerticalResult::Dj)
            .collect();
        if !out.results.is_empty() {
            out.warn("DJ sets: no live tracklists found, showing sample data");
        }
        return out;
    }

    out.results = events.into_vec().into_iter().map(VerticalResult::Dj).collect();
    out
}

async fn fetch_one(
    client: &ProviderClient,
    input: &NormalizedInput,
    events: &mut ResultMap<DjEvent>,
) -> Result<bool, ProviderError> {
    let body = client.get(endpoints::TRACKLIST_SEARCH, &[("isrc", input.id.as_str())]).await?;
    let Some(tracklists) = body.get("tracklists").and_then(Value::as_array) else {
        tracing::warn!(input = %input.badge(), "malformed tracklists payload");
        return Ok(false);
    };
    merge_tracklists(tracklists, input.input_index, events);
    Ok(true)
}

pub(crate) fn merge_tracklists(
    tracklists: &[Value],
    input_index: usize,
    events: &mut ResultMap<DjEvent>,
) {
    for tracklist in tracklists {
        let dj = json_str(tracklist, "dj").unwrap_or_else(|| "Unknown DJ".to_owned());
        let event = json_str(tracklist, "event_name").unwrap_or_else(|| "Unknown event".to_owned());
        let date = json_str(tracklist, "date").unwrap_or_default();
        let key = format!("{dj}-{event}-{date}");
        events.upsert(
            &key,
            input_index,
            || DjEvent {
                id: key.clone(),
                dj_name: dj.clone(),
                event_name: event.clone(),
                event_date: json_date(tracklist, "date"),
                venue: json_str(tracklist, "venue"),
                url: json_str(tracklist, "url"),
                matched_inputs: Default::default(),
            },
            |existing| {
                if existing.venue.is_none() {
                    existing.venue = json_str(tracklist, "venue");
                }
                if existing.url.is_none() {
                    existing.url = json_str(tracklist, "url");
                }
            },
        );
    }
}
