//! Debrid provider clients against fake provider APIs.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use bgtrackers_core::config::{RealDebridConfig, TorBoxConfig};
use bgtrackers_core::debrid::{
    check_all, DebridError, DebridProvider, ProviderId, RealDebridClient, TorBoxClient,
};
use common::spawn_server;

const CACHED: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const UNCACHED: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

fn authorized(headers: &HeaderMap, key: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", key))
        .unwrap_or(false)
}

async fn realdebrid_availability(headers: HeaderMap, Path(hashes): Path<String>) -> impl IntoResponse {
    if !authorized(&headers, "rd-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad_token" })));
    }

    let mut body = Map::new();
    for hash in hashes.split('/') {
        let hash = hash.to_lowercase();
        let entry = if hash == CACHED {
            json!({ "rd": [ { "1": { "filename": "movie.mkv", "filesize": 1024 } } ] })
        } else {
            json!({ "rd": [] })
        };
        body.insert(hash, entry);
    }
    (StatusCode::OK, Json(Value::Object(body)))
}

async fn torbox_checkcached(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers, "tb-key") {
        return Json(json!({ "success": false, "detail": "Invalid API key" }));
    }
    assert_eq!(params.get("format").map(String::as_str), Some("object"));
    assert_eq!(params.get("list_files").map(String::as_str), Some("false"));

    let mut data = Map::new();
    for hash in params.get("hash").map(String::as_str).unwrap_or("").split(',') {
        if hash.eq_ignore_ascii_case(CACHED) {
            data.insert(hash.to_string(), json!({ "name": "Movie", "size": 1024 }));
        } else {
            data.insert(hash.to_string(), Value::Null);
        }
    }
    Json(json!({ "success": true, "data": data }))
}

async fn fake_providers() -> String {
    let router = Router::new()
        .route(
            "/rd/torrents/instantAvailability/{*hashes}",
            get(realdebrid_availability),
        )
        .route("/tb/torrents/checkcached", get(torbox_checkcached))
        .route(
            "/broken/torrents/checkcached",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow/torrents/checkcached",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "success": true, "data": { CACHED: true } }))
            }),
        );
    spawn_server(router).await
}

fn realdebrid(base: &str, key: &str) -> RealDebridClient {
    RealDebridClient::new(RealDebridConfig {
        api_key: key.to_string(),
        base_url: format!("{}/rd", base),
        timeout_secs: 5,
    })
    .unwrap()
}

fn torbox(base: &str, key: &str, path: &str) -> TorBoxClient {
    torbox_with_timeout(base, key, path, 5)
}

fn torbox_with_timeout(base: &str, key: &str, path: &str, timeout_secs: u32) -> TorBoxClient {
    TorBoxClient::new(TorBoxConfig {
        api_key: key.to_string(),
        base_url: format!("{}/{}", base, path),
        timeout_secs,
    })
    .unwrap()
}

fn hashes() -> Vec<String> {
    vec![CACHED.to_uppercase(), UNCACHED.to_string()]
}

#[tokio::test]
async fn realdebrid_reports_cached_hashes_in_caller_casing() {
    let base = fake_providers().await;

    let map = realdebrid(&base, "rd-key").check_cached(&hashes()).await.unwrap();
    assert_eq!(map.get(&CACHED.to_uppercase()), Some(&true));
    assert_eq!(map.get(UNCACHED), Some(&false));
}

#[tokio::test]
async fn realdebrid_bad_key_is_an_api_error() {
    let base = fake_providers().await;

    let result = realdebrid(&base, "wrong").check_cached(&hashes()).await;
    assert!(matches!(result, Err(DebridError::ApiError { status: 401, .. })));
}

#[tokio::test]
async fn torbox_reports_cached_hashes() {
    let base = fake_providers().await;

    let map = torbox(&base, "tb-key", "tb").check_cached(&hashes()).await.unwrap();
    assert_eq!(map.get(&CACHED.to_uppercase()), Some(&true));
    assert_eq!(map.get(UNCACHED), Some(&false));
}

#[tokio::test]
async fn torbox_unsuccessful_response_is_rejected() {
    let base = fake_providers().await;

    let result = torbox(&base, "wrong", "tb").check_cached(&hashes()).await;
    assert!(matches!(result, Err(DebridError::Rejected(_))));
}

#[tokio::test]
async fn aggregator_merges_both_providers() {
    let base = fake_providers().await;
    let providers: Vec<Arc<dyn DebridProvider>> = vec![
        Arc::new(realdebrid(&base, "rd-key")),
        Arc::new(torbox(&base, "tb-key", "tb")),
    ];

    let availability = check_all(&providers, &[CACHED.to_string(), UNCACHED.to_string()]).await;
    let cached_by: Vec<&str> = availability
        .providers_for(CACHED)
        .unwrap()
        .iter()
        .map(ProviderId::as_str)
        .collect();
    assert_eq!(cached_by, vec!["RD", "TB"]);
    assert!(availability.providers_for(UNCACHED).is_none());
}

#[tokio::test]
async fn aggregator_tolerates_a_failing_provider() {
    let base = fake_providers().await;
    let providers: Vec<Arc<dyn DebridProvider>> = vec![
        Arc::new(realdebrid(&base, "rd-key")),
        Arc::new(torbox(&base, "tb-key", "broken")),
    ];

    let availability = check_all(&providers, &[CACHED.to_string(), UNCACHED.to_string()]).await;
    assert!(availability.is_cached_by(CACHED, &ProviderId::new("RD")));
    assert!(!availability.is_cached_by(CACHED, &ProviderId::new("TB")));
}

#[tokio::test]
async fn aggregator_skips_unconfigured_provider() {
    let base = fake_providers().await;
    let providers: Vec<Arc<dyn DebridProvider>> = vec![
        Arc::new(realdebrid(&base, "")),
        Arc::new(torbox(&base, "tb-key", "tb")),
    ];

    let availability = check_all(&providers, &[CACHED.to_string()]).await;
    let cached_by = availability.providers_for(CACHED).unwrap();
    assert_eq!(cached_by.len(), 1);
    assert!(cached_by.contains(&ProviderId::new("TB")));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let base = fake_providers().await;

    let result = torbox_with_timeout(&base, "tb-key", "slow", 1)
        .check_cached(&hashes())
        .await;
    assert!(matches!(result, Err(DebridError::HttpError(ref e)) if e.is_timeout()));
}

#[tokio::test]
async fn aggregator_keeps_healthy_results_when_a_provider_times_out() {
    let base = fake_providers().await;
    let providers: Vec<Arc<dyn DebridProvider>> = vec![
        Arc::new(realdebrid(&base, "rd-key")),
        Arc::new(torbox_with_timeout(&base, "tb-key", "slow", 1)),
    ];

    let started = Instant::now();
    let availability = check_all(&providers, &[CACHED.to_string(), UNCACHED.to_string()]).await;

    // Bounded by the slow client's timeout, not by the slow server
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(availability.is_cached_by(CACHED, &ProviderId::new("RD")));
    assert!(!availability.is_cached_by(CACHED, &ProviderId::new("TB")));
}
