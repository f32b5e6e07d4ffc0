use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};

use crate::api::client::ApiClient;
use crate::dashboard::cache::CollectionCache;
use crate::notify::{Notice, Notifier};

/// Which edit form is open, and for which record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Room,
    Resident,
    Payment,
}

#[derive(Debug, Default)]
struct Editors {
    room: Option<u64>,
    resident: Option<u64>,
    payment: Option<u64>,
}

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// State shared by the controller, its loaders and its actions.
pub struct DashboardContext {
    pub client: ApiClient,
    pub cache: CollectionCache,
    notifier: Arc<dyn Notifier>,
    editors: Mutex<Editors>,
    today: Clock,
}

impl DashboardContext {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            cache: CollectionCache::new(),
            notifier,
            editors: Mutex::new(Editors::default()),
            today: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Replace the calendar used for "today" (attendance roll call, new-record
    /// defaults).
    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    pub fn editing(&self, kind: EditorKind) -> Option<u64> {
        let editors = self.editors.lock().unwrap_or_else(|e| e.into_inner());
        match kind {
            EditorKind::Room => editors.room,
            EditorKind::Resident => editors.resident,
            EditorKind::Payment => editors.payment,
        }
    }

    /// `Some(id)` opens an edit form for `id`; `None` closes it (new-record mode).
    pub fn set_editing(&self, kind: EditorKind, id: Option<u64>) {
        let mut editors = self.editors.lock().unwrap_or_else(|e| e.into_inner());
        match kind {
            EditorKind::Room => editors.room = id,
            EditorKind::Resident => editors.resident = id,
            EditorKind::Payment => editors.payment = id,
        }
    }
}
