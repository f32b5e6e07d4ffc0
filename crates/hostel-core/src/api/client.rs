use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::envelope::Envelope;
use crate::api::errors::ApiError;
use crate::api::request::{ApiRequest, ApiResponse};
use crate::api::transport::Transport;
use crate::session::guard::{AuthResult, SessionGuard};

/// Authenticated API client.
///
/// Every request passes through the [`SessionGuard`] on the way out (credential
/// attached) and on the way back (401 handling). Cloning is cheap and shares
/// the transport and guard.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    guard: Arc<SessionGuard>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, guard: Arc<SessionGuard>) -> Self {
        Self { transport, guard }
    }

    pub fn guard(&self) -> &Arc<SessionGuard> {
        &self.guard
    }

    /// Send a guarded request and return the raw response.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.path.clone();
        let authorized = self.guard.authorize(&request);
        let response = self.transport.send(authorized).await?;

        match self.guard.handle_response(response) {
            AuthResult::Ok(response) => Ok(response),
            AuthResult::Unauthorized(_) => {
                warn!(event = "core.api.request_unauthorized", path = %path);
                Err(ApiError::Unauthorized { path })
            }
        }
    }

    /// Send a guarded request and decode the envelope.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<T>, ApiError> {
        let path = request.path.clone();
        let method = request.method;
        let response = self.send(request).await?;
        let envelope = decode(&path, response)?;
        debug!(
            event = "core.api.request_completed",
            method = %method,
            path = %path,
            success = envelope.success
        );
        Ok(envelope)
    }

    /// Fetch a collection; `success:false` becomes [`ApiError::Rejected`] and a
    /// missing `data` field an empty list.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        let fallback = format!("Failed to load {}", request.path);
        let envelope = self.execute::<Vec<T>>(request).await?;
        Ok(envelope.into_result(&fallback)?.unwrap_or_default())
    }

    /// Fetch a single record, `None` when the backend returns no data.
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>, ApiError> {
        let fallback = format!("Failed to load {}", request.path);
        let envelope = self.execute::<T>(request).await?;
        envelope.into_result(&fallback)
    }

    /// Issue a mutating request; `fallback` is the notification text used when
    /// the backend rejects without a message.
    pub async fn mutate(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let envelope = self.execute::<serde_json::Value>(request).await?;
        envelope.into_result(fallback)
    }

    /// Send without the guard: no credential attached and a 401 does not
    /// clear the session. Used for login.
    pub async fn execute_public<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<T>, ApiError> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        decode(&path, response)
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: ApiResponse) -> Result<Envelope<T>, ApiError> {
    match Envelope::parse(path, &response.body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !(200..300).contains(&response.status) => Err(ApiError::HttpStatus {
            path: path.to_string(),
            status: response.status,
        }),
        Err(e) => Err(e),
    }
}
