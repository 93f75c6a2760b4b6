//! Catalog and stream resources of the addon protocol.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bgtrackers_core::{ContentType, StreamEntry};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::metrics::STREAM_REQUESTS_TOTAL;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StreamsResponse {
    pub streams: Vec<StreamEntry>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub metas: Vec<serde_json::Value>,
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}

/// Resource ids arrive as `{id}.json`.
fn strip_json_suffix(id: &str) -> &str {
    id.strip_suffix(".json").unwrap_or(id)
}

fn parse_content_type(raw: &str) -> Result<ContentType, (StatusCode, Json<ErrorResponse>)> {
    raw.parse::<ContentType>()
        .map_err(|e| bad_request(e.to_string()))
}

/// Catalog browsing is not offered; the catalogs exist for search entry points.
pub async fn get_catalog(
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<CatalogResponse>, (StatusCode, Json<ErrorResponse>)> {
    let content_type = parse_content_type(&content_type)?;
    debug!(content_type = %content_type, catalog = %strip_json_suffix(&id), "Catalog requested");
    Ok(Json(CatalogResponse { metas: Vec::new() }))
}

pub async fn get_streams(
    State(state): State<Arc<AppState>>,
    Path((content_type, id)): Path<(String, String)>,
) -> Result<Json<StreamsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let content_type = parse_content_type(&content_type)?;
    let id = strip_json_suffix(&id);

    if id.is_empty() {
        return Err(bad_request("Missing content id".to_string()));
    }

    STREAM_REQUESTS_TOTAL
        .with_label_values(&[content_type.as_str()])
        .inc();
    info!(content_type = %content_type, id = %id, "Stream request");

    let streams = state.composer().compose_streams(content_type, id).await;
    Ok(Json(StreamsResponse { streams }))
}
