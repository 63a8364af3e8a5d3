use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campaign_scout_providers::{ProviderClient, ProviderConfig, ProviderKind, Providers};
use campaign_scout_research::ResearchService;
use campaign_scout_storage::{CampaignStore, MemoryStorage};
use serde_json::{Value, json};
use tower::util::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{AppState, create_router};

const ISRC: &str = "USZ4V2500091";

fn providers(base_url: &str, key: Option<&str>) -> Arc<Providers> {
    let client = |kind| {
        let config = ProviderConfig::new(kind, base_url, key.map(str::to_owned))
            .with_retry_delay(Duration::from_millis(1))
            .with_max_attempts(1);
        ProviderClient::new(config).unwrap()
    };
    Arc::new(Providers {
        playlist: client(ProviderKind::Playlist),
        airplay: client(ProviderKind::Airplay),
    })
}

fn app_with(providers: Arc<Providers>, store: Option<Arc<dyn CampaignStore>>) -> Router {
    let research = ResearchService::new(providers, store).with_seed(7);
    create_router(Arc::new(AppState { research: Arc::new(research) }))
}

fn app() -> Router {
    let store: Arc<dyn CampaignStore> = Arc::new(MemoryStorage::new());
    app_with(providers("http://127.0.0.1:9", None), Some(store))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn submit_press_campaign(app: &Router) -> String {
    let submission = json!({
        "campaign_name": "Autumn single",
        "reference_inputs": [ISRC, ""],
        "selected_verticals": ["press"],
    });
    let (status, body) = send(app, post_json("/api/campaigns", &submission)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["campaign_id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn health_and_version() {
    let app = app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_owned()));

    let (status, body) = send(&app, get("/api/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn submit_persists_and_returns_created() {
    let app = app();
    let submission = json!({
        "campaign_name": "  Autumn single ",
        "reference_inputs": [ISRC],
        "selected_verticals": ["press"],
    });
    let (status, body) = send(&app, post_json("/api/campaigns", &submission)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["saved"], true);
    assert_eq!(body["inputs"][0]["type"], "isrc");
    assert!(!body["results"]["press_results"].as_array().unwrap().is_empty());
    assert!(body["results"]["dsp_results"].as_array().unwrap().is_empty());

    let (status, list) = send(&app, get("/api/campaigns")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Autumn single");
    assert_eq!(list[0]["id"], body["campaign_id"]);
}

#[tokio::test]
async fn invalid_submission_is_bad_request() {
    let app = app();
    let submission = json!({
        "campaign_name": "",
        "reference_inputs": [ISRC],
        "selected_verticals": ["press"],
    });
    let (status, body) = send(&app, post_json("/api/campaigns", &submission)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn stored_campaign_round_trips() {
    let app = app();
    let id = submit_press_campaign(&app).await;

    let (status, body) = send(&app, get(&format!("/api/campaigns/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["campaign"]["id"], id.as_str());
    assert_eq!(body["inputs"].as_array().unwrap().len(), 1);
    assert!(!body["results"]["press_results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_campaign_is_not_found() {
    let app = app();
    let (status, body) = send(&app, get("/api/campaigns/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));

    let (status, _) = send(&app, get("/api/campaigns/does-not-exist/results")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn results_filters_by_vertical() {
    let app = app();
    let id = submit_press_campaign(&app).await;

    let (status, body) =
        send(&app, get(&format!("/api/campaigns/{id}/results?verticals=dsp,radio"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["press_results"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, get(&format!("/api/campaigns/{id}/results"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["press_results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn results_flatten_tags_each_entry() {
    let app = app();
    let id = submit_press_campaign(&app).await;

    let (status, body) = send(&app, get(&format!("/api/campaigns/{id}/results?flatten=true"))).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["vertical"] == "press"));
}

#[tokio::test]
async fn unknown_vertical_filter_is_bad_request() {
    let app = app();
    let id = submit_press_campaign(&app).await;
    let (status, _) = send(&app, get(&format!("/api/campaigns/{id}/results?verticals=tv"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn campaigns_without_storage_are_unavailable() {
    let app = app_with(providers("http://127.0.0.1:9", None), None);
    let (status, _) = send(&app, get("/api/campaigns")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let submission = json!({
        "campaign_name": "Autumn single",
        "reference_inputs": [ISRC],
        "selected_verticals": ["press"],
    });
    let (status, _) = send(&app, post_json("/api/campaigns", &submission)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn normalize_keeps_original_positions() {
    let app = app();
    let request = json!({
        "inputs": [
            "https://open.spotify.com/track/2Fxmhks0bxGSBdJ92vM42m",
            "",
            ISRC,
            "not a reference",
        ]
    });
    let (status, body) = send(&app, post_json("/api/normalize", &request)).await;
    assert_eq!(status, StatusCode::OK);
    let inputs = body.as_array().unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0]["type"], "spotify_track");
    assert_eq!(inputs[0]["input_index"], 0);
    assert_eq!(inputs[1]["type"], "isrc");
    assert_eq!(inputs[1]["id"], ISRC);
    assert_eq!(inputs[1]["input_index"], 2);
}

#[tokio::test]
async fn relay_forwards_json_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/radio/airplay"))
        .and(query_param("isrc", ISRC))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "plays": [], "extra": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with(providers(&server.uri(), Some("secret")), None);
    let request = json!({
        "provider": "airplay",
        "path": "/radio/airplay",
        "params": { "isrc": ISRC },
    });
    let (status, body) = send(&app, post_json("/api/relay", &request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "plays": [], "extra": 1 }));
}

#[tokio::test]
async fn relay_keeps_provider_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such track"))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with(providers(&server.uri(), Some("secret")), None);
    let request = json!({ "provider": "playlist", "path": "/tracks/missing" });
    let (status, body) = send(&app, post_json("/api/relay", &request)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn relay_rejects_bad_requests_without_calling_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;
    let app = app_with(providers(&server.uri(), Some("secret")), None);

    let unknown = json!({ "provider": "tv", "path": "/x" });
    let (status, _) = send(&app, post_json("/api/relay", &unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let traversal = json!({ "provider": "airplay", "path": "/../admin" });
    let (status, _) = send(&app, post_json("/api/relay", &traversal)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn relay_without_key_is_unavailable() {
    let app = app();
    let request = json!({ "provider": "airplay", "path": "/radio/airplay" });
    let (status, body) = send(&app, post_json("/api/relay", &request)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "provider_not_configured");
}

#[tokio::test]
async fn providers_status_reports_configuration() {
    let app = app();
    let (status, body) = send(&app, get("/api/providers/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], true);
    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["provider"], "playlist");
    assert_eq!(providers[0]["configured"], false);
    assert_eq!(providers[1]["provider"], "airplay");
}
