//! Typed section registry: each [`SectionId`] maps to one loader.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::api::errors::ApiError;
use crate::dashboard::context::DashboardContext;
use crate::dashboard::errors::DashboardError;
use crate::dashboard::section::SectionId;
use crate::dashboard::views::SectionContent;

/// Fetches a section's collections and builds its view content.
///
/// Loaders must be idempotent: the controller runs them on activation, on
/// manual refresh, on every timer tick and after actions.
pub type LoaderFn = Arc<
    dyn Fn(Arc<DashboardContext>) -> BoxFuture<'static, Result<SectionContent, ApiError>>
        + Send
        + Sync,
>;

/// Wrap an async function as a [`LoaderFn`].
pub fn loader<F, Fut>(f: F) -> LoaderFn
where
    F: Fn(Arc<DashboardContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SectionContent, ApiError>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

#[derive(Clone)]
pub struct SectionEntry {
    pub title: String,
    pub loader: LoaderFn,
}

#[derive(Default)]
pub struct SectionRegistry {
    entries: BTreeMap<SectionId, SectionEntry>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        section: SectionId,
        title: impl Into<String>,
        loader: LoaderFn,
    ) -> Result<(), DashboardError> {
        if self.entries.contains_key(&section) {
            return Err(DashboardError::DuplicateSection { section });
        }
        self.entries.insert(
            section,
            SectionEntry {
                title: title.into(),
                loader,
            },
        );
        Ok(())
    }

    /// Register by identifier; unknown identifiers are rejected.
    pub fn register_named(
        &mut self,
        name: &str,
        title: impl Into<String>,
        loader: LoaderFn,
    ) -> Result<SectionId, DashboardError> {
        let section: SectionId = name.parse()?;
        self.register(section, title, loader)?;
        Ok(section)
    }

    pub fn get(&self, section: SectionId) -> Option<&SectionEntry> {
        self.entries.get(&section)
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.entries.contains_key(&section)
    }

    /// Registered sections in navigation order.
    pub fn sections(&self) -> Vec<SectionId> {
        self.entries.keys().copied().collect()
    }
}
