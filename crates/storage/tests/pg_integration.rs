//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p campaign-scout-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use std::collections::BTreeSet;

use campaign_scout_core::{
    DjEvent, InputType, NormalizedInput, Playlist, PressArticle, RadioCategory, RadioStation,
    ResearchResults, Vertical, VerticalResult,
};
use campaign_scout_storage::{CampaignStore, PgStorage, StorageError};
use chrono::Utc;
use uuid::Uuid;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_name() -> String {
    format!("test-{}", Uuid::new_v4())
}

fn playlist(id: &str, matched: &[usize]) -> VerticalResult {
    VerticalResult::Dsp(Playlist {
        id: id.to_owned(),
        name: format!("Playlist {id}"),
        curator: Some("Editorial".to_owned()),
        followers: Some(12_500),
        last_updated: Some(Utc::now()),
        url: Some(format!("https://open.spotify.com/playlist/{id}")),
        matched_inputs: matched.iter().copied().collect(),
    })
}

#[tokio::test]
#[ignore]
async fn pg_create_and_load_empty_campaign() {
    let storage = create_pg_storage().await;
    let name = unique_name();
    let campaign = storage.create_campaign(&name).await.unwrap();
    assert_eq!(campaign.name, name);

    let loaded = storage.get_campaign_with_results(&campaign.id).await.unwrap().unwrap();
    assert_eq!(loaded.campaign.id, campaign.id);
    assert!(loaded.inputs.is_empty());
    assert!(loaded.results.is_empty());
}

#[tokio::test]
#[ignore]
async fn pg_missing_campaign_is_none() {
    let storage = create_pg_storage().await;
    let loaded = storage.get_campaign_with_results(&unique_name()).await.unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
#[ignore]
async fn pg_inputs_keep_original_index() {
    let storage = create_pg_storage().await;
    let campaign = storage.create_campaign(&unique_name()).await.unwrap();
    let inputs = vec![
        NormalizedInput::new(
            "2Fxmhks0bxGSBdJ92vM42m",
            InputType::SpotifyTrack,
            "https://open.spotify.com/track/2Fxmhks0bxGSBdJ92vM42m",
            0,
        ),
        NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 2),
    ];
    storage.save_reference_inputs(&campaign.id, &inputs).await.unwrap();

    let loaded = storage.get_campaign_with_results(&campaign.id).await.unwrap().unwrap();
    assert_eq!(loaded.inputs, inputs);
}

#[tokio::test]
#[ignore]
async fn pg_vertical_results_round_trip_in_order() {
    let storage = create_pg_storage().await;
    let campaign = storage.create_campaign(&unique_name()).await.unwrap();

    let dsp = vec![playlist("pl-b", &[0, 2]), playlist("pl-a", &[1])];
    storage.save_vertical_results(&campaign.id, Vertical::Dsp, &dsp).await.unwrap();

    let radio = vec![VerticalResult::Radio(RadioStation {
        id: "satellite-0".to_owned(),
        name: "Satellite Radio".to_owned(),
        market: None,
        country: Some("US".to_owned()),
        plays: 17,
        last_played: None,
        url: None,
        summary_category: Some(RadioCategory::Satellite),
        matched_inputs: BTreeSet::from([0]),
    })];
    storage.save_vertical_results(&campaign.id, Vertical::Radio, &radio).await.unwrap();

    let dj = vec![VerticalResult::Dj(DjEvent {
        id: "Peggy Gou-Boiler Room-2026-09-01".to_owned(),
        dj_name: "Peggy Gou".to_owned(),
        event_name: "Boiler Room".to_owned(),
        event_date: None,
        venue: Some("Berlin".to_owned()),
        url: None,
        matched_inputs: BTreeSet::from([2]),
    })];
    storage.save_vertical_results(&campaign.id, Vertical::Dj, &dj).await.unwrap();

    let press = vec![VerticalResult::Press(PressArticle {
        id: "press-1".to_owned(),
        outlet: "Pitchfork".to_owned(),
        title: "Track of the week".to_owned(),
        published_at: None,
        author: None,
        url: None,
        matched_inputs: BTreeSet::new(),
    })];
    storage.save_vertical_results(&campaign.id, Vertical::Press, &press).await.unwrap();

    let loaded = storage.get_campaign_with_results(&campaign.id).await.unwrap().unwrap();
    let ids: Vec<_> = loaded.results.dsp_results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["pl-b", "pl-a"]);
    assert_eq!(loaded.results.dsp_results[0].matched_inputs, BTreeSet::from([0, 2]));
    assert_eq!(loaded.results.radio_results[0].plays, 17);
    assert_eq!(loaded.results.radio_results[0].summary_category, Some(RadioCategory::Satellite));
    assert_eq!(loaded.results.dj_results[0].venue.as_deref(), Some("Berlin"));
    assert!(loaded.results.press_results[0].matched_inputs.is_empty());
}

#[tokio::test]
#[ignore]
async fn pg_rejects_mixed_vertical_batch() {
    let storage = create_pg_storage().await;
    let campaign = storage.create_campaign(&unique_name()).await.unwrap();
    let err = storage
        .save_vertical_results(&campaign.id, Vertical::Radio, &[playlist("pl", &[0])])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidInput(_)));
}

#[tokio::test]
#[ignore]
async fn pg_list_campaigns_newest_first() {
    let storage = create_pg_storage().await;
    let first = storage.create_campaign(&unique_name()).await.unwrap();
    let second = storage.create_campaign(&unique_name()).await.unwrap();

    let listed = storage.list_campaigns(50).await.unwrap();
    let pos = |id: &str| listed.iter().position(|c| c.id == id).unwrap();
    assert!(pos(&second.id) < pos(&first.id));
    assert!(storage.list_campaigns(1).await.unwrap().len() <= 1);
}

#[tokio::test]
#[ignore]
async fn pg_save_campaign_writes_everything() {
    let storage = create_pg_storage().await;
    let name = unique_name();
    let inputs = vec![NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 1)];
    let results = ResearchResults::from_tagged([playlist("pl-1", &[1]), playlist("pl-2", &[1])]);

    let campaign = storage.save_campaign(&name, &inputs, &results).await.unwrap();

    let loaded = storage.get_campaign_with_results(&campaign.id).await.unwrap().unwrap();
    assert_eq!(loaded.campaign.name, name);
    assert_eq!(loaded.inputs, inputs);
    let ids: Vec<_> = loaded.results.dsp_results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["pl-1", "pl-2"]);
}

#[tokio::test]
#[ignore]
async fn pg_failed_save_campaign_leaves_nothing_behind() {
    let storage = create_pg_storage().await;
    let name = unique_name();
    let inputs = vec![NormalizedInput::new("USZ4V2500091", InputType::Isrc, "USZ4V2500091", 0)];
    let overflowing = VerticalResult::Radio(RadioStation {
        id: "kexp".to_owned(),
        name: "KEXP".to_owned(),
        market: None,
        country: None,
        plays: u64::MAX,
        last_played: None,
        url: None,
        summary_category: None,
        matched_inputs: [0].into(),
    });
    let results = ResearchResults::from_tagged([playlist("pl-1", &[0]), overflowing]);

    assert!(storage.save_campaign(&name, &inputs, &results).await.is_err());

    let listed = storage.list_campaigns(200).await.unwrap();
    assert!(listed.iter().all(|c| c.name != name), "failed save left a campaign row");
}
