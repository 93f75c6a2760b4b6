use bgtrackers_core::{Config, SanitizedConfig, StreamComposer};

/// Shared application state
pub struct AppState {
    config: Config,
    composer: StreamComposer,
}

impl AppState {
    pub fn new(config: Config, composer: StreamComposer) -> Self {
        Self { config, composer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn composer(&self) -> &StreamComposer {
        &self.composer
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
