//! Configuration types for the hostel dashboard.
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 30
//!
//! [refresh]
//! interval_secs = 30
//! initial_section = "dashboard"
//!
//! [session]
//! required_role = "admin"
//! login_url = "login.html"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::defaults;
use crate::dashboard::section::SectionId;
use crate::errors::ConfigError;
use crate::session::types::Role;

/// Runtime configuration derived from the environment rather than files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for client state (default: ~/.hostel)
    pub hostel_dir: PathBuf,
    /// Log level from `HOSTEL_LOG_LEVEL`
    pub log_level: String,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the persisted session store.
    pub fn session_path(&self) -> PathBuf {
        self.hostel_dir.join("session.json")
    }
}

/// File-backed configuration.
///
/// Every field is optional so project files override user files key by key;
/// accessors fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostelConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST root, e.g. `http://localhost:8080/api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Auto-refresh period in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Section refreshed when none has been activated yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_section: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,

    /// Overrides `~/.hostel/session.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl HostelConfig {
    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.api
                .timeout_secs
                .unwrap_or(defaults::DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(
            self.refresh
                .interval_secs
                .unwrap_or(defaults::DEFAULT_REFRESH_INTERVAL_SECS),
        )
    }

    pub fn initial_section(&self) -> Result<SectionId, ConfigError> {
        let name = self
            .refresh
            .initial_section
            .as_deref()
            .unwrap_or(defaults::DEFAULT_INITIAL_SECTION);
        name.parse::<SectionId>()
            .map_err(|_| ConfigError::InvalidSection {
                section: name.to_string(),
                valid: SectionId::valid_names(),
            })
    }

    pub fn required_role(&self) -> Result<Role, ConfigError> {
        let name = self
            .session
            .required_role
            .as_deref()
            .unwrap_or(defaults::DEFAULT_REQUIRED_ROLE);
        name.parse::<Role>().map_err(|_| ConfigError::InvalidRole {
            role: name.to_string(),
        })
    }

    pub fn login_url(&self) -> &str {
        self.session
            .login_url
            .as_deref()
            .unwrap_or(defaults::DEFAULT_LOGIN_URL)
    }

    pub fn storage_path(&self, runtime: &Config) -> PathBuf {
        self.session
            .storage_path
            .clone()
            .unwrap_or_else(|| runtime.session_path())
    }
}
