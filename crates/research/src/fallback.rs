//! Sample-data generator.
//!
//! Produces structurally valid results from small static catalogs when a
//! provider is unconfigured or a vertical found nothing live. Every entry gets
//! one or two matched inputs drawn from the submission, a date inside the
//! recent window, and a key unique within its batch.

use campaign_scout_core::{
    DjEvent, FALLBACK_WINDOW_DAYS, MatchedInputs, NormalizedInput, Playlist, PressArticle,
    RadioStation, ResearchResults, Vertical,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

const PLAYLISTS: &[(&str, &str, u64)] = &[
    ("Fresh Finds", "Spotify", 820_000),
    ("New Music Friday", "Spotify", 3_900_000),
    ("Indie Mixtape", "Indie Mixtape Collective", 45_000),
    ("Late Night Drive", "Nightshift Records", 12_300),
    ("Chill Vibes", "Spotify", 1_200_000),
    ("Weekend Warm-Up", "Clubland Curators", 8_700),
    ("Bedroom Pop", "Spotify", 640_000),
    ("Coffee House Acoustic", "Acoustic Daily", 27_500),
];

const STATIONS: &[(&str, &str, &str)] = &[
    ("KEXP 90.3", "Seattle", "US"),
    ("BBC Radio 6 Music", "London", "GB"),
    ("Triple J", "Sydney", "AU"),
    ("KCRW 89.9", "Los Angeles", "US"),
    ("FluxFM", "Berlin", "DE"),
    ("Radio Nova", "Paris", "FR"),
    ("WFUV 90.7", "New York", "US"),
    ("CBC Music", "Toronto", "CA"),
];

const DJ_SETS: &[(&str, &str, &str)] = &[
    ("Peggy Gou", "Boiler Room Seoul", "Seoul"),
    ("Four Tet", "Printworks Closing", "London"),
    ("Honey Dijon", "Dekmantel Festival", "Amsterdam"),
    ("Bicep", "Essential Mix", "BBC Radio 1"),
    ("Fred again..", "USB002", "New York"),
    ("Charlotte de Witte", "KNTXT Ghent", "Ghent"),
    ("Jamie xx", "In Waves Tour", "Berlin"),
];

const OUTLETS: &[(&str, &str)] = &[
    ("Pitchfork", "pitchfork.com"),
    ("NME", "nme.com"),
    ("The FADER", "thefader.com"),
    ("Stereogum", "stereogum.com"),
    ("Billboard", "billboard.com"),
    ("Consequence", "consequence.net"),
    ("Mixmag", "mixmag.net"),
];

const HEADLINES: &[&str] = &[
    "Track of the Week",
    "Artists to Watch This Month",
    "The Best New Songs Right Now",
    "First Listen",
    "Premiere: A Closer Look",
];

const AUTHORS: &[&str] = &["Jordan Lee", "Sam Rivera", "Alex Morgan", "Casey Kim", "Robin Patel"];

const BASE62: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Build sample results for every selected vertical.
///
/// An empty input list yields empty results.
pub fn generate<R: Rng + ?Sized>(
    inputs: &[NormalizedInput],
    verticals: &[Vertical],
    now: DateTime<Utc>,
    rng: &mut R,
) -> ResearchResults {
    let mut results = ResearchResults::default();
    for vertical in Vertical::ALL.into_iter().filter(|v| verticals.contains(v)) {
        match vertical {
            Vertical::Dsp => results.dsp_results = playlists(inputs, now, rng),
            Vertical::Radio => results.radio_results = radio_stations(inputs, now, rng),
            Vertical::Dj => results.dj_results = dj_events(inputs, now, rng),
            Vertical::Press => results.press_results = press_articles(inputs, now, rng),
        }
    }
    results
}

pub fn playlists<R: Rng + ?Sized>(
    inputs: &[NormalizedInput],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Playlist> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let count = entry_count(PLAYLISTS.len(), rng);
    PLAYLISTS
        .choose_multiple(rng, count)
        .collect::<Vec<_>>()
        .into_iter()
        .map(|&(name, curator, base_followers)| {
            let spotify_id = base62_id(rng);
            let jitter = rng.random_range(0..=base_followers / 10);
            Playlist {
                id: format!("sample-{spotify_id}"),
                name: name.to_owned(),
                curator: Some(curator.to_owned()),
                followers: Some(base_followers.saturating_add(jitter)),
                last_updated: Some(recent_date(now, rng)),
                url: Some(format!("https://open.spotify.com/playlist/{spotify_id}")),
                matched_inputs: pick_matched(inputs, rng),
            }
        })
        .collect()
}

pub fn radio_stations<R: Rng + ?Sized>(
    inputs: &[NormalizedInput],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<RadioStation> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let count = entry_count(STATIONS.len(), rng);
    STATIONS
        .choose_multiple(rng, count)
        .collect::<Vec<_>>()
        .into_iter()
        .map(|&(name, market, country)| RadioStation {
            id: format!("sample-{}", slug(name)),
            name: name.to_owned(),
            market: Some(market.to_owned()),
            country: Some(country.to_owned()),
            plays: rng.random_range(1..=40),
            last_played: Some(recent_date(now, rng)),
            url: None,
            summary_category: None,
            matched_inputs: pick_matched(inputs, rng),
        })
        .collect()
}

pub fn dj_events<R: Rng + ?Sized>(
    inputs: &[NormalizedInput],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<DjEvent> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let count = entry_count(DJ_SETS.len(), rng);
    DJ_SETS
        .choose_multiple(rng, count)
        .collect::<Vec<_>>()
        .into_iter()
        .map(|&(dj, event, venue)| {
            let date = recent_date(now, rng);
            DjEvent {
                id: format!("{dj}-{event}-{}", date.format("%Y-%m-%d")),
                dj_name: dj.to_owned(),
                event_name: event.to_owned(),
                event_date: Some(date),
                venue: Some(venue.to_owned()),
                url: Some(format!("https://www.1001tracklists.com/tracklist/{}", slug(event))),
                matched_inputs: pick_matched(inputs, rng),
            }
        })
        .collect()
}

pub fn press_articles<R: Rng + ?Sized>(
    inputs: &[NormalizedInput],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<PressArticle> {
    if inputs.is_empty() {
        return Vec::new();
    }
    let count = entry_count(OUTLETS.len(), rng);
    OUTLETS
        .choose_multiple(rng, count)
        .collect::<Vec<_>>()
        .into_iter()
        .map(|&(outlet, domain)| {
            let title = HEADLINES.choose(rng).copied().unwrap_or("First Listen");
            PressArticle {
                id: format!("sample-{}", slug(outlet)),
                outlet: outlet.to_owned(),
                title: title.to_owned(),
                published_at: Some(recent_date(now, rng)),
                author: AUTHORS.choose(rng).map(|a| (*a).to_owned()),
                url: Some(format!("https://{domain}/{}", slug(title))),
                matched_inputs: pick_matched(inputs, rng),
            }
        })
        .collect()
}

/// Between three and six entries, bounded by the catalog.
fn entry_count<R: Rng + ?Sized>(catalog_len: usize, rng: &mut R) -> usize {
    let max = catalog_len.min(6);
    rng.random_range(max.min(3)..=max)
}

/// One or two distinct input positions.
fn pick_matched<R: Rng + ?Sized>(inputs: &[NormalizedInput], rng: &mut R) -> MatchedInputs {
    let count = if inputs.len() >= 2 { rng.random_range(1..=2) } else { 1 };
    inputs.choose_multiple(rng, count).map(|i| i.input_index).collect()
}

fn recent_date<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> DateTime<Utc> {
    let window_secs = FALLBACK_WINDOW_DAYS.saturating_mul(86_400);
    now - Duration::seconds(rng.random_range(0..window_secs))
}

fn base62_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..22)
        .map(|_| char::from(BASE62.choose(rng).copied().unwrap_or(b'0')))
        .collect()
}

fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use campaign_scout_core::{InputType, VerticalResult, flatten};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn inputs() -> Vec<NormalizedInput> {
        vec![
            NormalizedInput::new(
                "2Fxmhks0bxGSBdJ92vM42m",
                InputType::SpotifyTrack,
                "https://open.spotify.com/track/2Fxmhks0bxGSBdJ92vM42m",
                0,
            ),
            NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 2),
        ]
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let results = generate(&[], &Vertical::ALL, Utc::now(), &mut rng);
        assert!(results.is_empty());
    }

    #[test]
    fn only_selected_verticals_are_filled() {
        let mut rng = StdRng::seed_from_u64(2);
        let results = generate(&inputs(), &[Vertical::Press], Utc::now(), &mut rng);
        assert!(results.dsp_results.is_empty());
        assert!(results.radio_results.is_empty());
        assert!(results.dj_results.is_empty());
        assert!(!results.press_results.is_empty());
    }

    #[test]
    fn entries_satisfy_result_invariants() {
        let now = Utc::now();
        let known: HashSet<usize> = inputs().iter().map(|i| i.input_index).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let results = generate(&inputs(), &Vertical::ALL, now, &mut rng);
            for vertical in Vertical::ALL {
                let entries = results.vertical_results(vertical);
                assert!((3..=6).contains(&entries.len()), "seed {seed} {vertical}");
                let keys: HashSet<&str> = entries.iter().map(VerticalResult::id).collect();
                assert_eq!(keys.len(), entries.len(), "duplicate key for seed {seed}");
                for entry in &entries {
                    assert_eq!(entry.vertical(), vertical);
                    let matched = entry.matched_inputs();
                    assert!((1..=2).contains(&matched.len()));
                    assert!(matched.iter().all(|i| known.contains(i)));
                    let date = entry.date().unwrap();
                    assert!(date <= now);
                    assert!(date > now - Duration::days(FALLBACK_WINDOW_DAYS));
                }
            }
        }
    }

    #[test]
    fn single_input_always_matches_it() {
        let only = vec![NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 5)];
        let mut rng = StdRng::seed_from_u64(7);
        let results = generate(&only, &Vertical::ALL, Utc::now(), &mut rng);
        for entry in flatten(&results) {
            assert_eq!(entry.matched_inputs().iter().copied().collect::<Vec<_>>(), vec![5]);
        }
    }

    #[test]
    fn same_seed_same_output() {
        let now = Utc::now();
        let a = generate(&inputs(), &Vertical::ALL, now, &mut StdRng::seed_from_u64(9));
        let b = generate(&inputs(), &Vertical::ALL, now, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slug("KEXP 90.3"), "kexp-90-3");
        assert_eq!(slug("Fred again.."), "fred-again");
    }
}
