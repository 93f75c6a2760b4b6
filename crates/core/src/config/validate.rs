use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Indexer timeouts, redirect bound and resolve parallelism are positive
/// - Provider and metadata timeouts are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    let indexer = &config.indexer;
    if indexer.max_redirect_hops == 0 {
        return Err(invalid("indexer.max_redirect_hops must be at least 1"));
    }
    if indexer.max_parallel_resolves == 0 {
        return Err(invalid("indexer.max_parallel_resolves must be at least 1"));
    }

    let timeouts = [
        ("indexer.timeout_secs", indexer.timeout_secs),
        ("indexer.resolve_timeout_secs", indexer.resolve_timeout_secs),
        ("debrid.realdebrid.timeout_secs", config.debrid.realdebrid.timeout_secs),
        ("debrid.torbox.timeout_secs", config.debrid.torbox.timeout_secs),
        ("metadata.timeout_secs", config.metadata.timeout_secs),
    ];
    for (key, value) in timeouts {
        if value == 0 {
            return Err(ConfigError::ValidationError(format!("{} cannot be 0", key)));
        }
    }

    Ok(())
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}
