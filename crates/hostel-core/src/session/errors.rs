use crate::api::errors::ApiError;
use crate::errors::HostelError;
use crate::session::types::Role;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Not signed in: no credential stored")]
    MissingCredential,

    #[error("Not signed in: no identity stored")]
    MissingIdentity,

    #[error("Stored identity is unreadable: {message}")]
    CorruptIdentity { message: String },

    #[error("Session is no longer logged in")]
    NotLoggedIn,

    #[error("Role '{actual}' is not allowed here (requires '{required}')")]
    RoleMismatch { required: Role, actual: Role },

    #[error("Login was rejected: {message}")]
    LoginRejected { message: String },

    #[error("Login request failed: {source}")]
    LoginFailed {
        #[from]
        source: ApiError,
    },

    #[error("Session storage failed: {message}")]
    StorageFailed { message: String },

    #[error("IO operation failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl HostelError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::MissingCredential => "SESSION_MISSING_CREDENTIAL",
            SessionError::MissingIdentity => "SESSION_MISSING_IDENTITY",
            SessionError::CorruptIdentity { .. } => "SESSION_CORRUPT_IDENTITY",
            SessionError::NotLoggedIn => "SESSION_NOT_LOGGED_IN",
            SessionError::RoleMismatch { .. } => "SESSION_ROLE_MISMATCH",
            SessionError::LoginRejected { .. } => "SESSION_LOGIN_REJECTED",
            SessionError::LoginFailed { .. } => "SESSION_LOGIN_FAILED",
            SessionError::StorageFailed { .. } => "SESSION_STORAGE_FAILED",
            SessionError::IoError { .. } => "SESSION_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(
            self,
            SessionError::LoginFailed { .. }
                | SessionError::StorageFailed { .. }
                | SessionError::IoError { .. }
        )
    }
}
