use std::error::Error;
use std::path::PathBuf;

/// Shared contract of the domain error enums (`ConfigError`, `SessionError`,
/// `ApiError`, `DashboardError`).
///
/// `error_code` is a stable identifier for logs; `is_user_error` picks the log
/// level in [`crate::events::log_app_error`].
pub trait HostelError: Error + Send + Sync + 'static {
    fn error_code(&self) -> &'static str;

    /// Bad input or an expected rejection, logged as a warning.
    fn is_user_error(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file '{}' is not valid TOML: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Could not determine the working directory: {0}")]
    WorkingDir(#[from] std::io::Error),

    #[error("Invalid API base URL '{url}': must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    #[error("Invalid section '{section}'. Valid sections: {valid}")]
    InvalidSection { section: String, valid: String },

    #[error("Invalid role '{role}'. Valid roles: admin, resident, staff")]
    InvalidRole { role: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl HostelError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CONFIG_READ_FAILED",
            ConfigError::Parse { .. } => "CONFIG_PARSE_FAILED",
            ConfigError::WorkingDir(_) => "CONFIG_WORKING_DIR",
            ConfigError::InvalidBaseUrl { .. } => "CONFIG_INVALID_BASE_URL",
            ConfigError::InvalidSection { .. } => "CONFIG_INVALID_SECTION",
            ConfigError::InvalidRole { .. } => "CONFIG_INVALID_ROLE",
            ConfigError::InvalidConfiguration { .. } => "CONFIG_INVALID",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, ConfigError::Read { .. } | ConfigError::WorkingDir(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "localhost:8080".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid API base URL 'localhost:8080': must start with http:// or https://"
        );
        assert_eq!(error.error_code(), "CONFIG_INVALID_BASE_URL");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let error = ConfigError::Parse {
            path: PathBuf::from("/home/w/.hostel/config.toml"),
            message: "expected `]`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Config file '/home/w/.hostel/config.toml' is not valid TOML: expected `]`"
        );
        assert!(error.is_user_error());
    }

    #[test]
    fn test_unreadable_file_is_system_error() {
        let error = ConfigError::Read {
            path: PathBuf::from("config.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.error_code(), "CONFIG_READ_FAILED");
        assert!(!error.is_user_error());
    }
}
