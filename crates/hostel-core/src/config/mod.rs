//! # Configuration
//!
//! Hierarchical TOML configuration: built-in defaults, then
//! `~/.hostel/config.toml`, then `./.hostel/config.toml`, then CLI flags.
//!
//! ```rust,no_run
//! use hostel_core::config::HostelConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HostelConfig::load_hierarchy()?;
//!     println!("polling every {:?}", config.refresh_interval());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{ApiConfig, Config, HostelConfig, RefreshConfig, SessionConfig};
pub use validation::validate_config;

impl HostelConfig {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// See [`validation::validate_config`].
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
