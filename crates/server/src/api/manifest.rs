//! Addon manifest and landing page.

use axum::{extract::State, response::Html, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

const DESCRIPTION: &str =
    "Unified search across Bulgarian torrent trackers with Real-Debrid and TorBox cache badges";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub id_prefixes: Vec<&'static str>,
    pub catalogs: Vec<CatalogDescriptor>,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Serialize)]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub extra: Vec<CatalogExtra>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogExtra {
    pub name: &'static str,
    pub is_required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub adult: bool,
    pub p2p: bool,
    pub configurable: bool,
    pub configuration_required: bool,
}

fn catalog(content_type: &'static str, id: &'static str, name: &'static str) -> CatalogDescriptor {
    CatalogDescriptor {
        content_type,
        id,
        name,
        extra: vec![
            CatalogExtra {
                name: "search",
                is_required: false,
            },
            CatalogExtra {
                name: "genre",
                is_required: false,
            },
        ],
    }
}

impl Manifest {
    pub fn from_state(state: &AppState) -> Self {
        let addon = &state.config().addon;
        Self {
            id: addon.id.clone(),
            version: addon.version.clone(),
            name: addon.name.clone(),
            description: DESCRIPTION.to_string(),
            resources: vec!["catalog", "stream"],
            types: vec!["movie", "series"],
            id_prefixes: vec!["tt", "tmdb"],
            catalogs: vec![
                catalog("movie", "bg-trackers-movies", "🇧🇬 BG Movies"),
                catalog("series", "bg-trackers-series", "🇧🇬 BG Series"),
            ],
            behavior_hints: BehaviorHints {
                adult: false,
                p2p: true,
                configurable: true,
                configuration_required: false,
            },
        }
    }
}

pub async fn get_manifest(State(state): State<Arc<AppState>>) -> Json<Manifest> {
    Json(Manifest::from_state(&state))
}

pub async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_landing(&state))
}

fn status_line(label: &str, configured: bool) -> String {
    let status = if configured {
        "🟢 Configured"
    } else {
        "🔴 Not configured"
    };
    format!("<p>{}: {}</p>", label, status)
}

fn render_landing(state: &AppState) -> String {
    let addon = &state.config().addon;
    let sanitized = state.sanitized_config();
    let name = escape_html(&addon.name);
    let version = escape_html(&addon.version);
    let id = escape_html(&addon.id);

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8">
        <title>{name}</title>
        <style>
            body {{ font-family: sans-serif; max-width: 720px; margin: 40px auto; padding: 0 20px; background: #1a1a2e; color: #eee; }}
            .install-btn {{ display: inline-block; padding: 12px 24px; background: #8a5a9f; color: #fff; border-radius: 6px; text-decoration: none; }}
        </style>
    </head>
    <body>
        <h1>🇧🇬 {name}</h1>
        <p>Version: {version}</p>
        <p>{description}</p>
        <h2>Installation</h2>
        <a href="stremio://{id}/manifest.json" class="install-btn">Install in Stremio</a>
        <h2>Status</h2>
        <p>🟢 Addon is running</p>
        {indexer}
        {realdebrid}
        {torbox}
    </body>
</html>
"#,
        name = name,
        version = version,
        id = id,
        description = DESCRIPTION,
        indexer = status_line("Jackett", state.composer().searcher_configured()),
        realdebrid = status_line("Real-Debrid", sanitized.debrid.realdebrid_configured),
        torbox = status_line("TorBox", sanitized.debrid.torbox_configured),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
