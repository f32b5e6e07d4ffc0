//! Wire transport for API requests.
//!
//! The client talks to the backend through the [`Transport`] trait so the
//! session and refresh logic can run against an in-process fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::request::{ApiRequest, ApiResponse, Method};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw status and body.
    ///
    /// Only connection-level problems are errors; every HTTP status,
    /// including 401, comes back as a response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest` backed transport rooted at the API base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                path: base_url.clone(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = request.url(&self.base_url);
        debug!(
            event = "core.api.http_request_started",
            method = %request.method,
            url = %url
        );

        let mut builder = self.client.request(to_reqwest_method(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| ApiError::Transport {
            path: request.path.clone(),
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Transport {
            path: request.path.clone(),
            message: format!("Failed to read response body: {}", e),
        })?;

        debug!(
            event = "core.api.http_request_completed",
            method = %request.method,
            url = %url,
            status = status
        );

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_builds() {
        let transport = HttpTransport::new("http://localhost:8080/api", Duration::from_secs(5));
        assert!(transport.is_ok());
        assert_eq!(transport.unwrap().base_url(), "http://localhost:8080/api");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is closed on CI machines.
        let transport =
            HttpTransport::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let err = transport.send(ApiRequest::get("rooms")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { ref path, .. } if path == "rooms"));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(Method::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest_method(Method::Delete), reqwest::Method::DELETE);
    }
}
