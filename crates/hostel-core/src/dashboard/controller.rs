//! Polling refresh controller.
//!
//! Owns the section registry, the active-section marker, the per-section view
//! models and the single auto-refresh timer. Loads of the same section may
//! overlap; whichever finishes last decides what the view shows.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::dashboard::context::DashboardContext;
use crate::dashboard::errors::DashboardError;
use crate::dashboard::loaders::default_loaders;
use crate::dashboard::registry::{LoaderFn, SectionRegistry};
use crate::dashboard::section::SectionId;
use crate::dashboard::views::{LoadState, SectionContent, SectionView};
use crate::notify::Notice;

/// Default auto-refresh period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

pub const REFRESH_SUCCESS_MESSAGE: &str = "Data refreshed successfully!";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Result of one loader run, as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered,
    Failed(String),
    /// The backend rejected the credential; the session is gone.
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SectionLoaded { section: SectionId, state: LoadState },
    AutoRefreshStarted { interval: Duration },
    AutoRefreshStopped,
    SessionExpired,
}

#[derive(Default)]
struct ControllerState {
    active: Option<SectionId>,
    page_title: Option<String>,
    views: BTreeMap<SectionId, SectionView>,
    last_refresh: Option<DateTime<Local>>,
    timer: Option<JoinHandle<()>>,
}

pub struct Dashboard {
    context: Arc<DashboardContext>,
    registry: Mutex<SectionRegistry>,
    state: Mutex<ControllerState>,
    initial_section: SectionId,
    events: broadcast::Sender<DashboardEvent>,
}

impl Dashboard {
    /// Controller with an empty registry.
    pub fn new(context: Arc<DashboardContext>, initial_section: SectionId) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            context,
            registry: Mutex::new(SectionRegistry::new()),
            state: Mutex::new(ControllerState::default()),
            initial_section,
            events,
        })
    }

    /// Controller with the nine built-in sections registered.
    pub fn with_default_sections(
        context: Arc<DashboardContext>,
        initial_section: SectionId,
    ) -> Result<Arc<Self>, DashboardError> {
        let dashboard = Self::new(context, initial_section);
        for (section, loader) in default_loaders() {
            dashboard.register_section(section, section.title(), loader)?;
        }
        Ok(dashboard)
    }

    pub fn context(&self) -> &Arc<DashboardContext> {
        &self.context
    }

    pub fn initial_section(&self) -> SectionId {
        self.initial_section
    }

    pub fn register_section(
        &self,
        section: SectionId,
        title: impl Into<String>,
        loader: LoaderFn,
    ) -> Result<(), DashboardError> {
        let title = title.into();
        self.lock_registry()
            .register(section, title.clone(), loader)?;
        self.lock_state()
            .views
            .insert(section, SectionView::idle(section, title));
        debug!(event = "core.dashboard.section_registered", section = %section);
        Ok(())
    }

    /// Register by identifier; unknown names and duplicates are errors.
    pub fn register_named(
        &self,
        name: &str,
        title: impl Into<String>,
        loader: LoaderFn,
    ) -> Result<SectionId, DashboardError> {
        let section: SectionId = name.parse()?;
        self.register_section(section, title, loader)?;
        Ok(section)
    }

    pub fn sections(&self) -> Vec<SectionId> {
        self.lock_registry().sections()
    }

    /// Make `section` the single active section and run its loader.
    ///
    /// Activating the section that is already active only re-runs the loader.
    pub async fn activate_section(&self, section: SectionId) -> Result<LoadOutcome, DashboardError> {
        let (title, loader) = self.entry(section)?;
        {
            let mut state = self.lock_state();
            let previous = state.active.replace(section);
            state.page_title = Some(title);
            if previous != Some(section) {
                info!(
                    event = "core.dashboard.section_activated",
                    section = %section,
                    previous = previous.map(|p| p.as_str()).unwrap_or("none")
                );
            }
        }
        Ok(self.run_loader(section, loader).await)
    }

    /// Re-run the active section's loader, or the initial section's when none
    /// is active yet, and stamp the refresh time.
    pub async fn refresh_active(&self) -> LoadOutcome {
        let section = self.active_section().unwrap_or(self.initial_section);
        let outcome = match self.entry(section) {
            Ok((_, loader)) => self.run_loader(section, loader).await,
            Err(e) => {
                warn!(event = "core.dashboard.refresh_skipped", section = %section, error = %e);
                LoadOutcome::Failed(e.to_string())
            }
        };
        self.lock_state().last_refresh = Some(Local::now());
        outcome
    }

    /// User-requested refresh of the active section.
    pub async fn manual_refresh(&self) -> LoadOutcome {
        let outcome = self.refresh_active().await;
        if outcome != LoadOutcome::Unauthorized {
            self.context.notify(Notice::success(REFRESH_SUCCESS_MESSAGE));
        }
        outcome
    }

    /// Re-run the loaders of `sections` that are registered, in order.
    pub async fn reload(&self, sections: &[SectionId]) {
        for &section in sections {
            if let Ok((_, loader)) = self.entry(section) {
                self.run_loader(section, loader).await;
            }
        }
    }

    /// Start polling `refresh_active` every `interval`, replacing any running
    /// timer. The first tick fires one full interval from now.
    ///
    /// A zero interval is rejected and leaves any running timer untouched.
    pub fn start_auto_refresh(self: &Arc<Self>, interval: Duration) -> Result<(), DashboardError> {
        if interval.is_zero() {
            warn!(event = "core.dashboard.auto_refresh_rejected", reason = "zero_interval");
            return Err(DashboardError::InvalidInterval);
        }

        let weak = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(dashboard) = weak.upgrade() else {
                    debug!(event = "core.dashboard.auto_refresh_orphaned");
                    break;
                };
                debug!(event = "core.dashboard.auto_refresh_tick");
                dashboard.refresh_active().await;
            }
        });

        let previous = self.lock_state().timer.replace(handle);
        if let Some(previous) = previous {
            previous.abort();
            debug!(event = "core.dashboard.auto_refresh_replaced");
        }
        info!(
            event = "core.dashboard.auto_refresh_started",
            interval_secs = interval.as_secs()
        );
        let _ = self.events.send(DashboardEvent::AutoRefreshStarted { interval });
        Ok(())
    }

    pub fn stop_auto_refresh(&self) {
        let timer = self.lock_state().timer.take();
        if let Some(timer) = timer {
            timer.abort();
            info!(event = "core.dashboard.auto_refresh_stopped");
            let _ = self.events.send(DashboardEvent::AutoRefreshStopped);
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.lock_state()
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.lock_state().active
    }

    /// Title of the active section, if any.
    pub fn page_title(&self) -> Option<String> {
        self.lock_state().page_title.clone()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.lock_state().last_refresh
    }

    pub fn view(&self, section: SectionId) -> Option<SectionView> {
        let state = self.lock_state();
        state.views.get(&section).map(|view| SectionView {
            active: state.active == Some(section),
            ..view.clone()
        })
    }

    /// Every registered section's view, in navigation order.
    pub fn views(&self) -> Vec<SectionView> {
        let state = self.lock_state();
        state
            .views
            .values()
            .map(|view| SectionView {
                active: state.active == Some(view.section),
                ..view.clone()
            })
            .collect()
    }

    /// Replace a section's content outside its loader (e.g. a date-filtered
    /// food list).
    pub(crate) fn show_content(&self, section: SectionId, content: SectionContent) {
        {
            let mut state = self.lock_state();
            if let Some(view) = state.views.get_mut(&section) {
                view.state = LoadState::Rendered;
                view.content = Some(content);
                view.error = None;
                view.loaded_at = Some(Local::now());
            }
        }
        let _ = self.events.send(DashboardEvent::SectionLoaded {
            section,
            state: LoadState::Rendered,
        });
    }

    /// Session lost: stop polling and tell subscribers.
    pub(crate) fn session_expired(&self) {
        self.stop_auto_refresh();
        let _ = self.events.send(DashboardEvent::SessionExpired);
    }

    fn entry(&self, section: SectionId) -> Result<(String, LoaderFn), DashboardError> {
        self.lock_registry()
            .get(section)
            .map(|entry| (entry.title.clone(), entry.loader.clone()))
            .ok_or(DashboardError::SectionNotRegistered { section })
    }

    async fn run_loader(&self, section: SectionId, loader: LoaderFn) -> LoadOutcome {
        self.set_view_state(section, LoadState::Loading);
        debug!(event = "core.dashboard.load_started", section = %section);

        let result = loader(self.context.clone()).await;

        let (state, outcome) = match result {
            Ok(content) => {
                let mut guard = self.lock_state();
                if let Some(view) = guard.views.get_mut(&section) {
                    view.state = LoadState::Rendered;
                    view.content = Some(content);
                    view.error = None;
                    view.loaded_at = Some(Local::now());
                }
                drop(guard);
                debug!(event = "core.dashboard.load_completed", section = %section);
                (LoadState::Rendered, LoadOutcome::Rendered)
            }
            Err(e) => {
                let message = e.user_message();
                self.mark_failed(section, &message);
                if e.is_unauthorized() {
                    warn!(event = "core.dashboard.load_unauthorized", section = %section);
                    self.context.notify(Notice::error(message));
                    self.session_expired();
                    (LoadState::Failed, LoadOutcome::Unauthorized)
                } else {
                    error!(
                        event = "core.dashboard.load_failed",
                        section = %section,
                        error = %e
                    );
                    self.context.notify(Notice::error(format!(
                        "Failed to load {}: {}",
                        section.title(),
                        message
                    )));
                    (LoadState::Failed, LoadOutcome::Failed(message))
                }
            }
        };

        let _ = self
            .events
            .send(DashboardEvent::SectionLoaded { section, state });
        outcome
    }

    fn set_view_state(&self, section: SectionId, load_state: LoadState) {
        if let Some(view) = self.lock_state().views.get_mut(&section) {
            view.state = load_state;
        }
    }

    fn mark_failed(&self, section: SectionId, message: &str) {
        if let Some(view) = self.lock_state().views.get_mut(&section) {
            view.state = LoadState::Failed;
            view.error = Some(message.to_string());
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_registry(&self) -> MutexGuard<'_, SectionRegistry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let timer = self
            .state
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .timer
            .take();
        if let Some(timer) = timer {
            timer.abort();
        }
    }
}
