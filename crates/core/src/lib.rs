pub mod config;
pub mod debrid;
pub mod metadata;
pub mod metrics;
pub mod searcher;
pub mod streams;
pub mod testing;

pub use config::{
    config_path_from_env, load_config, load_config_from_env, load_config_from_str,
    validate_config, Config, ConfigError, LoggingConfig, SanitizedConfig,
};
pub use debrid::{
    check_all, Availability, AvailabilityMap, DebridError, DebridProvider, ProviderId,
    RealDebridClient, TorBoxClient,
};
pub use metadata::{CinemetaClient, ContentMeta, MetadataError, MetadataLookup};
pub use searcher::{ContentType, JackettSearcher, LinkResolver, SearchResult, Searcher};
pub use streams::{StreamComposer, StreamEntry, StreamLocator};
