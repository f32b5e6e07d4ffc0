//! Session guard: attaches the stored credential to outgoing requests and
//! signs the user out when the backend rejects it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::api::request::{ApiRequest, ApiResponse};
use crate::session::errors::SessionError;
use crate::session::storage::ClientStorage;
use crate::session::types::{Credential, IDENTITY_KEY, Identity, Role, TOKEN_KEY};

/// Performs the "go to login" side effect.
///
/// A browser would change `window.location`; the CLI prints a hint and the
/// watch loop stops.
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self, login_url: &str);
}

/// Navigator that only records the redirect in the log.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect_to_login(&self, login_url: &str) {
        info!(event = "core.session.redirect_logged", login_url = login_url);
    }
}

/// Outcome of passing a response through the guard.
///
/// `Unauthorized` still carries the response; the session has already been
/// cleared and the redirect issued, and the caller decides whether to stop.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthResult {
    Ok(ApiResponse),
    Unauthorized(ApiResponse),
}

impl AuthResult {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AuthResult::Unauthorized(_))
    }

    pub fn into_response(self) -> ApiResponse {
        match self {
            AuthResult::Ok(response) | AuthResult::Unauthorized(response) => response,
        }
    }
}

pub struct SessionGuard {
    storage: Arc<dyn ClientStorage>,
    navigator: Arc<dyn Navigator>,
    login_url: String,
    /// Set once the session has been torn down; cleared by `store_credential`.
    expired: AtomicBool,
}

impl SessionGuard {
    pub fn new(
        storage: Arc<dyn ClientStorage>,
        navigator: Arc<dyn Navigator>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            navigator,
            login_url: login_url.into(),
            expired: AtomicBool::new(false),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Read and decode the stored identity record.
    pub fn identity(&self) -> Result<Identity, SessionError> {
        let raw = self
            .storage
            .get(IDENTITY_KEY)
            .ok_or(SessionError::MissingIdentity)?;
        serde_json::from_str(&raw).map_err(|e| SessionError::CorruptIdentity {
            message: e.to_string(),
        })
    }

    /// Copy of `request` carrying `Authorization: Bearer <token>` when a
    /// credential is stored; an unmodified copy otherwise.
    pub fn authorize(&self, request: &ApiRequest) -> ApiRequest {
        let mut authorized = request.clone();
        match self.token() {
            Some(token) => {
                authorized
                    .headers
                    .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
                authorized
                    .headers
                    .push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
            None => {
                debug!(
                    event = "core.session.authorize_skipped",
                    path = %request.path,
                    reason = "no credential"
                );
            }
        }
        authorized
    }

    /// Inspect a response; on 401 clear the session and redirect once.
    pub fn handle_response(&self, response: ApiResponse) -> AuthResult {
        if response.is_unauthorized() {
            self.expire("unauthorized_response", true);
            AuthResult::Unauthorized(response)
        } else {
            AuthResult::Ok(response)
        }
    }

    /// Start-up gate, run before any section loads.
    ///
    /// Redirects to login (once) and returns the reason when the token or
    /// identity is missing, the identity is not logged in, or the role differs.
    pub fn require_session(&self, required: Role) -> Result<Identity, SessionError> {
        match self.check_session(required) {
            Ok(identity) => {
                info!(
                    event = "core.session.gate_passed",
                    role = %identity.role,
                    user = identity.display_name()
                );
                Ok(identity)
            }
            Err(e) => {
                warn!(event = "core.session.gate_failed", error = %e);
                self.expire("gate_failed", false);
                Err(e)
            }
        }
    }

    fn check_session(&self, required: Role) -> Result<Identity, SessionError> {
        if self.token().is_none() {
            return Err(SessionError::MissingCredential);
        }
        let identity = self.identity()?;
        if !identity.logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        if identity.role != required {
            return Err(SessionError::RoleMismatch {
                required,
                actual: identity.role,
            });
        }
        Ok(identity)
    }

    /// Persist a freshly issued credential and re-arm the 401 latch.
    pub fn store_credential(&self, credential: &Credential) -> Result<(), SessionError> {
        let identity = serde_json::to_string(&credential.identity).map_err(|e| {
            SessionError::StorageFailed {
                message: e.to_string(),
            }
        })?;
        self.storage.set(TOKEN_KEY, &credential.token)?;
        self.storage.set(IDENTITY_KEY, &identity)?;
        self.expired.store(false, Ordering::SeqCst);
        info!(
            event = "core.session.credential_stored",
            role = %credential.identity.role
        );
        Ok(())
    }

    /// Explicit logout: always clears and redirects.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.expired.store(true, Ordering::SeqCst);
        self.clear_storage()?;
        info!(event = "core.session.signed_out");
        self.navigator.redirect_to_login(&self.login_url);
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    fn expire(&self, reason: &'static str, clear: bool) {
        if self.expired.swap(true, Ordering::SeqCst) {
            debug!(event = "core.session.expire_skipped", reason = reason);
            return;
        }

        if clear && let Err(e) = self.clear_storage() {
            warn!(event = "core.session.clear_failed", error = %e);
        }

        info!(
            event = "core.session.redirect_triggered",
            reason = reason,
            login_url = %self.login_url
        );
        self.navigator.redirect_to_login(&self.login_url);
    }

    fn clear_storage(&self) -> Result<(), SessionError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(IDENTITY_KEY)?;
        Ok(())
    }
}
