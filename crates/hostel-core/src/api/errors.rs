use crate::errors::HostelError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Session expired or rejected while calling '{path}'")]
    Unauthorized { path: String },

    #[error("Request to '{path}' failed: {message}")]
    Transport { path: String, message: String },

    #[error("Backend returned HTTP {status} for '{path}'")]
    HttpStatus { path: String, status: u16 },

    #[error("Malformed response from '{path}': {message}")]
    Decode { path: String, message: String },

    #[error("{message}")]
    Rejected { message: String },
}

impl ApiError {
    /// Message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message } => message.clone(),
            ApiError::Unauthorized { .. } => "Session expired, please log in again".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl HostelError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized { .. } => "API_UNAUTHORIZED",
            ApiError::Transport { .. } => "API_TRANSPORT_FAILED",
            ApiError::HttpStatus { .. } => "API_HTTP_STATUS",
            ApiError::Decode { .. } => "API_DECODE_FAILED",
            ApiError::Rejected { .. } => "API_REJECTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Rejected { .. }
        )
    }
}
