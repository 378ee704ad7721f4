use super::{types::Config, ConfigError, GeneratorBackend};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Default image dimensions are non-zero
/// - Stream channel capacity is non-zero
/// - HTTP generator backend has an endpoint and a non-zero timeout
/// - Job timeout, when set, is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.stream.default_width == 0 || config.stream.default_height == 0 {
        return Err(ConfigError::ValidationError(
            "stream.default_width and stream.default_height must be greater than 0".to_string(),
        ));
    }

    if config.stream.channel_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "stream.channel_capacity cannot be 0".to_string(),
        ));
    }

    if config.generator.backend == GeneratorBackend::Http {
        match &config.generator.http {
            Some(http) if http.url.trim().is_empty() => {
                return Err(ConfigError::ValidationError(
                    "generator.http.url cannot be empty".to_string(),
                ))
            }
            Some(http) if http.timeout_secs == 0 => {
                return Err(ConfigError::ValidationError(
                    "generator.http.timeout_secs cannot be 0".to_string(),
                ))
            }
            Some(_) => {}
            None => {
                return Err(ConfigError::ValidationError(
                    "generator.backend = \"http\" requires a [generator.http] section".to_string(),
                ))
            }
        }
    }

    if config.job.timeout_ms == Some(0) {
        return Err(ConfigError::ValidationError(
            "job.timeout_ms cannot be 0 (omit it to wait indefinitely)".to_string(),
        ));
    }

    Ok(())
}
