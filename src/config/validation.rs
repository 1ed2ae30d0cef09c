use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::url::is_valid_absolute_url;
use crate::ConfigError;

/// Largest worker pool accepted for concurrent mode
const MAX_CONCURRENCY: usize = 256;

/// Smallest accepted probe or request timeout (milliseconds)
const MIN_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_seeds(&config.seeds)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // depth >= 0 is always true for u32, so no check needed

    if let Some(concurrency) = config.concurrency {
        if !(1..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(ConfigError::Validation(format!(
                "concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY, concurrency
            )));
        }
    }

    if config.probe_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "probe_timeout_ms must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.probe_timeout_ms
        )));
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= {}ms, got {}ms",
            MIN_TIMEOUT_MS, config.request_timeout_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates seed URLs
///
/// An empty list is allowed here; seeds may come from the command line instead.
pub fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    for seed in seeds {
        if !is_valid_absolute_url(seed) {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed '{}' is not an absolute HTTP(S) URL",
                seed
            )));
        }
    }

    Ok(())
}
