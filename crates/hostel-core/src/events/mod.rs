//! Application lifecycle log events shared by the CLI and library callers.

use tracing::{error, info, warn};

use crate::errors::HostelError;

pub fn log_app_startup(command: &str) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        command = command
    );
}

pub fn log_app_shutdown(reason: &str) {
    info!(event = "core.app.shutdown_started", reason = reason);
}

/// Log a domain error at the level its kind deserves.
///
/// User errors (bad input, rejected credentials) are warnings; everything else
/// is an error.
pub fn log_app_error(error: &dyn HostelError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error = %error,
            error_code = error.error_code()
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn test_app_events() {
        log_app_startup("show");
        log_app_shutdown("completed");

        log_app_error(&ConfigError::InvalidRole {
            role: "guest".to_string(),
        });
        log_app_error(&ConfigError::WorkingDir(std::io::Error::other("test")));
    }
}
