//! hostel-core: Core library for the hostel admin dashboard client
//!
//! Talks to the hostel management REST backend on behalf of an administrator.
//! It is used by the `hostel` CLI.
//!
//! # Main Entry Points
//!
//! - [`session`] - Session guard: credential storage, request authorization, 401 handling
//! - [`dashboard`] - Section registry, polling refresh controller and actions
//! - [`api`] - Transport, request builders and the guarded client
//! - [`models`] - Entity records and edit forms
//! - [`config`] - Configuration management

pub mod api;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod logging;
pub mod models;
pub mod notify;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use api::{ApiClient, ApiError, HttpTransport, Resource, Transport};
pub use config::{Config, HostelConfig};
pub use dashboard::{
    ActionOutcome, Confirm, Dashboard, DashboardContext, DashboardError, DashboardEvent,
    LoadOutcome, SectionContent, SectionId, SectionView,
};
pub use errors::{ConfigError, HostelError};
pub use notify::{Notice, NoticeLevel, NoticeLog, Notifier};
pub use session::{Identity, Role, SessionError, SessionGuard};

// Re-export logging initialization
pub use logging::init_logging;
