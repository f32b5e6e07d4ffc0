//! Polling refresh controller and the dashboard sections it drives.

pub mod actions;
pub mod cache;
pub mod context;
pub mod controller;
pub mod errors;
pub mod loaders;
pub mod registry;
pub mod section;
pub mod views;

pub use actions::{ActionOutcome, Confirm};
pub use cache::CollectionCache;
pub use context::{DashboardContext, EditorKind};
pub use controller::{
    DEFAULT_REFRESH_INTERVAL, Dashboard, DashboardEvent, LoadOutcome, REFRESH_SUCCESS_MESSAGE,
};
pub use errors::DashboardError;
pub use registry::{LoaderFn, SectionEntry, SectionRegistry, loader};
pub use section::SectionId;
pub use views::{
    Activity, ActivityKind, AttendanceView, DashboardSummary, FoodView, LoadState, PaymentRow,
    PaymentsView, SectionContent, SectionView, format_rupees,
};
