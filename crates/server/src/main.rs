use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bgtrackers_core::{
    config_path_from_env, load_config, load_config_from_env, validate_config, CinemetaClient,
    Config, DebridProvider, JackettSearcher, LoggingConfig, MetadataLookup, RealDebridClient,
    SanitizedConfig, Searcher, StreamComposer, TorBoxClient,
};
use bgtrackers_server::api::create_router;
use bgtrackers_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be initialized yet
        eprintln!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = load_startup_config()?;
    init_tracing(&config.logging);

    info!(version = VERSION, "Starting BG Trackers addon");

    // Compute config hash so restarts with changed settings are visible in logs
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    let sanitized = SanitizedConfig::from(&config);
    info!(
        config_hash = &config_hash[..16],
        indexer_configured = config.indexer.is_configured(),
        realdebrid_configured = sanitized.debrid.realdebrid_configured,
        torbox_configured = sanitized.debrid.torbox_configured,
        "Configuration loaded"
    );

    let composer = build_composer(&config)?;

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, composer));
    let app = create_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Read the config file if present, otherwise start from defaults plus environment.
fn load_startup_config() -> Result<Config> {
    let config_path = config_path_from_env();

    let config = if config_path.exists() {
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        load_config_from_env().context("Failed to load config from environment")?
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", logging.level)));

    let json_layer = logging
        .json
        .then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!logging.json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn build_composer(config: &Config) -> Result<StreamComposer> {
    let searcher: Arc<dyn Searcher> = Arc::new(
        JackettSearcher::new(config.indexer.clone()).context("Failed to create Jackett client")?,
    );
    if config.indexer.is_configured() {
        info!("Jackett indexer at {}", config.indexer.url);
    } else {
        info!("Jackett indexer not configured, searches will return nothing");
    }

    let providers: Vec<Arc<dyn DebridProvider>> = vec![
        Arc::new(
            RealDebridClient::new(config.debrid.realdebrid.clone())
                .context("Failed to create Real-Debrid client")?,
        ),
        Arc::new(
            TorBoxClient::new(config.debrid.torbox.clone())
                .context("Failed to create TorBox client")?,
        ),
    ];

    let metadata: Arc<dyn MetadataLookup> = Arc::new(
        CinemetaClient::new(config.metadata.clone())
            .context("Failed to create metadata client")?,
    );

    Ok(StreamComposer::new(
        searcher,
        providers,
        metadata,
        config.addon.name.clone(),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
