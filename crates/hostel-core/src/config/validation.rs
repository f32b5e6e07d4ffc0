use crate::config::types::HostelConfig;
use crate::errors::ConfigError;

/// Validate a merged configuration.
///
/// # Errors
///
/// Returns the first problem found: a non-http(s) base URL, a zero timeout or
/// interval, an unknown initial section, or an unknown role.
pub fn validate_config(config: &HostelConfig) -> Result<(), ConfigError> {
    let base_url = config.base_url();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
        });
    }

    if config.api.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "api.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.refresh.interval_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "refresh.interval_secs must be greater than 0".to_string(),
        });
    }

    config.initial_section()?;
    config.required_role()?;

    if config.login_url().trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "session.login_url must not be empty".to_string(),
        });
    }

    Ok(())
}
