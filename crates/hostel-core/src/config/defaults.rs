//! Built-in configuration defaults.

use crate::config::types::Config;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_INITIAL_SECTION: &str = "dashboard";
pub const DEFAULT_REQUIRED_ROLE: &str = "admin";
pub const DEFAULT_LOGIN_URL: &str = "login.html";

impl Default for Config {
    fn default() -> Self {
        let hostel_dir = match dirs::home_dir() {
            Some(home) => home.join(".hostel"),
            None => {
                eprintln!(
                    "Warning: Could not find home directory. Set HOME environment variable. \
                    Using fallback directory."
                );
                std::env::temp_dir().join(".hostel")
            }
        };

        Self {
            hostel_dir,
            log_level: std::env::var("HOSTEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
