use crate::api::errors::ApiError;
use crate::dashboard::section::SectionId;
use crate::errors::HostelError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Unknown section '{name}'")]
    UnknownSection { name: String },

    #[error("Section '{section}' has no registered loader")]
    SectionNotRegistered { section: SectionId },

    #[error("Section '{section}' is already registered")]
    DuplicateSection { section: SectionId },

    #[error("{kind} {id} is not loaded; refresh the {section} section first")]
    NotInCache {
        kind: &'static str,
        id: u64,
        section: SectionId,
    },

    #[error("Auto-refresh interval must be greater than zero")]
    InvalidInterval,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl HostelError for DashboardError {
    fn error_code(&self) -> &'static str {
        match self {
            DashboardError::UnknownSection { .. } => "DASHBOARD_UNKNOWN_SECTION",
            DashboardError::SectionNotRegistered { .. } => "DASHBOARD_SECTION_NOT_REGISTERED",
            DashboardError::DuplicateSection { .. } => "DASHBOARD_DUPLICATE_SECTION",
            DashboardError::NotInCache { .. } => "DASHBOARD_NOT_IN_CACHE",
            DashboardError::InvalidInterval => "DASHBOARD_INVALID_INTERVAL",
            DashboardError::Api(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DashboardError::Api(e) => e.is_user_error(),
            _ => true,
        }
    }
}
