use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub addon: AddonConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indexer: IndexerConfig,
    #[serde(default)]
    pub debrid: DebridConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Identity advertised in the addon manifest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddonConfig {
    #[serde(default = "default_addon_id")]
    pub id: String,
    #[serde(default = "default_addon_name")]
    pub name: String,
    #[serde(default = "default_addon_version")]
    pub version: String,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: default_addon_id(),
            name: default_addon_name(),
            version: default_addon_version(),
        }
    }
}

fn default_addon_id() -> String {
    "community.bg-trackers".to_string()
}

fn default_addon_name() -> String {
    "BG Trackers Unified Search".to_string()
}

fn default_addon_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (e.g. "info", "bgtrackers_core=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Jackett indexer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexerConfig {
    /// Jackett server URL (e.g., "http://localhost:9117")
    #[serde(default)]
    pub url: String,
    /// Jackett API key
    #[serde(default)]
    pub api_key: String,
    /// Search request timeout in seconds (default: 30)
    #[serde(default = "default_indexer_timeout")]
    pub timeout_secs: u32,
    /// Timeout for each download-link request in seconds (default: 15)
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_secs: u32,
    /// Maximum HTTP requests issued while following one download link (default: 2)
    #[serde(default = "default_max_redirect_hops")]
    pub max_redirect_hops: u32,
    /// Maximum concurrent download-link resolutions per search (default: 8)
    #[serde(default = "default_max_parallel_resolves")]
    pub max_parallel_resolves: usize,
}

impl IndexerConfig {
    /// Both endpoint and key are present.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_secs: default_indexer_timeout(),
            resolve_timeout_secs: default_resolve_timeout(),
            max_redirect_hops: default_max_redirect_hops(),
            max_parallel_resolves: default_max_parallel_resolves(),
        }
    }
}

fn default_indexer_timeout() -> u32 {
    30
}

fn default_resolve_timeout() -> u32 {
    15
}

fn default_max_redirect_hops() -> u32 {
    2
}

fn default_max_parallel_resolves() -> usize {
    8
}

/// Debrid provider credentials
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DebridConfig {
    #[serde(default)]
    pub realdebrid: RealDebridConfig,
    #[serde(default)]
    pub torbox: TorBoxConfig,
}

/// Real-Debrid configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RealDebridConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_realdebrid_url")]
    pub base_url: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u32,
}

impl Default for RealDebridConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_realdebrid_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_realdebrid_url() -> String {
    "https://api.real-debrid.com/rest/1.0".to_string()
}

/// TorBox configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorBoxConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_torbox_url")]
    pub base_url: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u32,
}

impl Default for TorBoxConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_torbox_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_torbox_url() -> String {
    "https://api.torbox.app/v1/api".to_string()
}

fn default_provider_timeout() -> u32 {
    10
}

/// Metadata (Cinemeta) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default = "default_cinemeta_url")]
    pub base_url: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u32,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: default_cinemeta_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_cinemeta_url() -> String {
    "https://v3-cinemeta.strem.io".to_string()
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub addon: AddonConfig,
    pub logging: LoggingConfig,
    pub indexer: SanitizedIndexerConfig,
    pub debrid: SanitizedDebridConfig,
    pub metadata: MetadataConfig,
}

/// Sanitized indexer config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedIndexerConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub resolve_timeout_secs: u32,
    pub max_redirect_hops: u32,
    pub max_parallel_resolves: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedDebridConfig {
    pub realdebrid_configured: bool,
    pub torbox_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            addon: config.addon.clone(),
            logging: config.logging.clone(),
            indexer: SanitizedIndexerConfig {
                url: config.indexer.url.clone(),
                api_key_configured: !config.indexer.api_key.is_empty(),
                timeout_secs: config.indexer.timeout_secs,
                resolve_timeout_secs: config.indexer.resolve_timeout_secs,
                max_redirect_hops: config.indexer.max_redirect_hops,
                max_parallel_resolves: config.indexer.max_parallel_resolves,
            },
            debrid: SanitizedDebridConfig {
                realdebrid_configured: !config.debrid.realdebrid.api_key.is_empty(),
                torbox_configured: !config.debrid.torbox.api_key.is_empty(),
            },
            metadata: config.metadata.clone(),
        }
    }
}
