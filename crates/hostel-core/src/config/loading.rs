//! Configuration loading and merging.
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. User config (`~/.hostel/config.toml`)
//! 3. Project config (`./.hostel/config.toml`)
//! 4. CLI flags, applied by the caller after loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{ApiConfig, HostelConfig, RefreshConfig, SessionConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Load and validate the user and project configuration files.
///
/// # Errors
///
/// Missing files are skipped; unreadable or malformed files and a failed
/// validation are errors.
pub fn load_hierarchy() -> Result<HostelConfig, ConfigError> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".hostel").join("config.toml"));
    }
    paths.push(std::env::current_dir()?.join(".hostel").join("config.toml"));
    load_from_paths(&paths)
}

/// Load `paths` in order, each overriding the ones before it.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<HostelConfig, ConfigError> {
    let mut config = HostelConfig::default();

    for path in paths {
        if let Some(file_config) = load_config_file(path)? {
            debug!(event = "core.config.file_loaded", path = %path.display());
            config = merge_configs(config, file_config);
        }
    }

    validate_config(&config)?;
    Ok(config)
}

/// Parse a single configuration file; `None` when it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<HostelConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
}

/// Merge two configurations, `override_config` winning key by key.
pub fn merge_configs(base: HostelConfig, override_config: HostelConfig) -> HostelConfig {
    HostelConfig {
        api: ApiConfig {
            base_url: override_config.api.base_url.or(base.api.base_url),
            timeout_secs: override_config.api.timeout_secs.or(base.api.timeout_secs),
        },
        refresh: RefreshConfig {
            interval_secs: override_config
                .refresh
                .interval_secs
                .or(base.refresh.interval_secs),
            initial_section: override_config
                .refresh
                .initial_section
                .or(base.refresh.initial_section),
        },
        session: SessionConfig {
            required_role: override_config
                .session
                .required_role
                .or(base.session.required_role),
            login_url: override_config.session.login_url.or(base.session.login_url),
            storage_path: override_config
                .session
                .storage_path
                .or(base.session.storage_path),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_from_paths(&[dir.path().join("nope.toml")]).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_project_overrides_user_key_by_key() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("project.toml");
        fs::write(
            &user,
            r#"
[api]
base_url = "https://hostel.example/api"
timeout_secs = 5

[refresh]
interval_secs = 60
"#,
        )
        .unwrap();
        fs::write(
            &project,
            r#"
[refresh]
interval_secs = 15
"#,
        )
        .unwrap();

        let config = load_from_paths(&[user, project]).unwrap();
        assert_eq!(config.base_url(), "https://hostel.example/api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();
        let err = load_from_paths(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_merged_config_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"ftp://nope\"\n").unwrap();
        let err = load_from_paths(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }
}
