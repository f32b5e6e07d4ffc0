//! Shared fixtures: a scripted in-process backend and a wired-up dashboard.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use hostel_core::api::{ApiClient, ApiError, ApiRequest, ApiResponse, Method, Transport};
use hostel_core::dashboard::{Dashboard, DashboardContext, SectionId};
use hostel_core::notify::NoticeLog;
use hostel_core::session::{ClientStorage, Credential, Identity, MemoryStorage, Navigator, Role, SessionGuard};

pub const EMPTY_LIST: &str = r#"{"success":true,"data":[]}"#;

enum Reply {
    Respond(u16, String),
    Drop(String),
}

/// Backend keyed by `"METHOD path"`; unknown routes answer an empty list.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Reply>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            format!("{} {}", method, path),
            Reply::Respond(status, body.to_string()),
        );
    }

    /// `{"success":true,"data":<data>}` with status 200.
    pub fn data(&self, method: Method, path: &str, data: serde_json::Value) {
        let body = serde_json::json!({ "success": true, "data": data }).to_string();
        self.respond(method, path, 200, &body);
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.routes.lock().unwrap().insert(
            format!("{} {}", method, path),
            Reply::Drop(message.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// `"METHOD path"` of every request, in send order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = format!("{} {}", request.method, request.path);
        self.seen.lock().unwrap().push(request.clone());
        match self.routes.lock().unwrap().get(&key) {
            Some(Reply::Respond(status, body)) => Ok(ApiResponse::new(*status, body.clone())),
            Some(Reply::Drop(message)) => Err(ApiError::Transport {
                path: request.path,
                message: message.clone(),
            }),
            None => Ok(ApiResponse::new(200, EMPTY_LIST)),
        }
    }
}

#[derive(Default)]
pub struct CountingNavigator {
    redirects: AtomicUsize,
}

impl CountingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self, _login_url: &str) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Storage that counts removals so tests can assert a single clear.
#[derive(Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    removals: AtomicUsize,
}

impl CountingStorage {
    pub fn removals(&self) -> usize {
        self.removals.load(Ordering::SeqCst)
    }
}

impl ClientStorage for CountingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), hostel_core::SessionError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), hostel_core::SessionError> {
        self.removals.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key)
    }
}

pub struct Harness {
    pub transport: Arc<FakeTransport>,
    pub storage: Arc<CountingStorage>,
    pub navigator: Arc<CountingNavigator>,
    pub guard: Arc<SessionGuard>,
    pub notices: Arc<NoticeLog>,
    pub dashboard: Arc<Dashboard>,
}

pub fn admin_credential() -> Credential {
    Credential {
        token: "t0k3n".to_string(),
        identity: Identity::signed_in(Role::Admin, Some("Warden".to_string()), None),
    }
}

pub fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Signed-in admin, built-in sections, calendar pinned to 2024-06-01.
pub fn harness(initial_section: SectionId) -> Harness {
    let transport = FakeTransport::new();
    let storage = Arc::new(CountingStorage::default());
    let navigator = Arc::new(CountingNavigator::default());
    let guard = Arc::new(SessionGuard::new(
        storage.clone(),
        navigator.clone(),
        "login.html",
    ));
    guard.store_credential(&admin_credential()).unwrap();

    let notices = Arc::new(NoticeLog::new());
    let client = ApiClient::new(transport.clone(), guard.clone());
    let context = DashboardContext::new(client, notices.clone()).with_today(june_first);
    let dashboard = Dashboard::with_default_sections(Arc::new(context), initial_section).unwrap();

    Harness {
        transport,
        storage,
        navigator,
        guard,
        notices,
        dashboard,
    }
}
