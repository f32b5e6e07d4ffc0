//! Session operations used by the front end: login, logout and whoami.

use tracing::{error, info};

use crate::api::client::ApiClient;
use crate::api::endpoints;
use crate::session::errors::SessionError;
use crate::session::guard::SessionGuard;
use crate::session::types::{AuthResponse, Identity, LoginRequest};

/// Exchange credentials for a token and persist the resulting session.
///
/// The login call bypasses the guard so a wrong password never tears down an
/// existing session.
pub async fn login(
    client: &ApiClient,
    email_or_username: &str,
    password: &str,
) -> Result<Identity, SessionError> {
    info!(
        event = "core.session.login_started",
        user = email_or_username
    );

    let body = serde_json::to_value(LoginRequest {
        email_or_username: email_or_username.to_string(),
        password: password.to_string(),
    })
    .map_err(|e| SessionError::StorageFailed {
        message: format!("Failed to encode login request: {}", e),
    })?;

    let envelope = client
        .execute_public::<AuthResponse>(endpoints::login(body))
        .await?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Invalid credentials".to_string());
        error!(event = "core.session.login_failed", message = %message);
        return Err(SessionError::LoginRejected { message });
    }

    let auth = envelope.data.ok_or_else(|| SessionError::LoginRejected {
        message: "Login response carried no token".to_string(),
    })?;
    let credential = auth.into_credential();
    client.guard().store_credential(&credential)?;

    info!(
        event = "core.session.login_completed",
        role = %credential.identity.role
    );
    Ok(credential.identity)
}

/// Clear the stored session and issue the login redirect.
pub fn logout(guard: &SessionGuard) -> Result<(), SessionError> {
    guard.sign_out()
}

/// Identity of the stored session, without the role gate or any redirect.
pub fn whoami(guard: &SessionGuard) -> Result<Identity, SessionError> {
    if guard.token().is_none() {
        return Err(SessionError::MissingCredential);
    }
    let identity = guard.identity()?;
    if !identity.logged_in {
        return Err(SessionError::NotLoggedIn);
    }
    Ok(identity)
}
