//! Session guard behavior as seen through the API client.

mod common;

use std::sync::Arc;

use common::{CountingNavigator, CountingStorage, FakeTransport, admin_credential};
use hostel_core::api::endpoints::{self, Resource};
use hostel_core::api::{ApiClient, ApiError, Method};
use hostel_core::models::Room;
use hostel_core::session::{self, Role, SessionError, SessionGuard};

fn client(
    transport: Arc<FakeTransport>,
) -> (ApiClient, Arc<CountingStorage>, Arc<CountingNavigator>) {
    let storage = Arc::new(CountingStorage::default());
    let navigator = Arc::new(CountingNavigator::default());
    let guard = Arc::new(SessionGuard::new(
        storage.clone(),
        navigator.clone(),
        "login.html",
    ));
    (ApiClient::new(transport, guard), storage, navigator)
}

#[tokio::test]
async fn test_bearer_header_only_when_signed_in() {
    let transport = FakeTransport::new();
    let (client, _, _) = client(transport.clone());

    client
        .fetch_list::<Room>(endpoints::list(Resource::Rooms))
        .await
        .unwrap();
    client.guard().store_credential(&admin_credential()).unwrap();
    client
        .fetch_list::<Room>(endpoints::list(Resource::Rooms))
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].header("Authorization"), None);
    assert!(requests[0].headers.is_empty());
    assert_eq!(requests[1].header("Authorization"), Some("Bearer t0k3n"));
}

#[tokio::test]
async fn test_concurrent_401s_clear_and_redirect_once() {
    let transport = FakeTransport::new();
    for path in ["rooms", "residents", "payments", "complaints", "visits"] {
        transport.respond(Method::Get, path, 401, "");
    }
    let (client, storage, navigator) = client(transport.clone());
    client.guard().store_credential(&admin_credential()).unwrap();

    let (rooms, residents, payments, complaints, visits) = futures::join!(
        client.fetch_list::<serde_json::Value>(endpoints::list(Resource::Rooms)),
        client.fetch_list::<serde_json::Value>(endpoints::list(Resource::Residents)),
        client.fetch_list::<serde_json::Value>(endpoints::list(Resource::Payments)),
        client.fetch_list::<serde_json::Value>(endpoints::list(Resource::Complaints)),
        client.fetch_list::<serde_json::Value>(endpoints::list(Resource::Visits)),
    );

    for result in [rooms, residents, payments, complaints, visits] {
        assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    }
    assert_eq!(navigator.redirects(), 1);
    // token and identity, removed once each
    assert_eq!(storage.removals(), 2);
    assert_eq!(client.guard().token(), None);

    // a fresh sign-in re-arms the latch
    client.guard().store_credential(&admin_credential()).unwrap();
    let _ = client
        .fetch_list::<serde_json::Value>(endpoints::list(Resource::Rooms))
        .await;
    assert_eq!(navigator.redirects(), 2);
}

#[tokio::test]
async fn test_login_stores_credential_and_passes_gate() {
    let transport = FakeTransport::new();
    transport.data(
        Method::Post,
        "auth/login",
        serde_json::json!({
            "token": "abc",
            "role": "ADMIN",
            "name": "Warden",
            "email": "warden@hostel.lk"
        }),
    );
    let (client, _, navigator) = client(transport.clone());

    let identity = session::login(&client, "warden", "secret").await.unwrap();
    assert_eq!(identity.role, Role::Admin);
    assert_eq!(client.guard().token().as_deref(), Some("abc"));

    let request = &transport.requests()[0];
    assert_eq!(request.header("Authorization"), None);
    let body = request.body.as_ref().unwrap();
    assert_eq!(body["emailOrUsername"], "warden");

    let gated = client.guard().require_session(Role::Admin).unwrap();
    assert_eq!(gated.display_name(), "Warden");
    assert_eq!(navigator.redirects(), 0);
}

#[tokio::test]
async fn test_rejected_login_keeps_existing_session() {
    let transport = FakeTransport::new();
    transport.respond(
        Method::Post,
        "auth/login",
        401,
        r#"{"success":false,"message":"Invalid password"}"#,
    );
    let (client, storage, navigator) = client(transport);
    client.guard().store_credential(&admin_credential()).unwrap();

    let err = session::login(&client, "warden", "wrong").await.unwrap_err();
    assert!(matches!(err, SessionError::LoginRejected { ref message } if message == "Invalid password"));
    assert_eq!(client.guard().token().as_deref(), Some("t0k3n"));
    assert_eq!(storage.removals(), 0);
    assert_eq!(navigator.redirects(), 0);
}

#[test]
fn test_gate_rejects_other_roles() {
    let (client, _, navigator) = client(FakeTransport::new());
    let mut credential = admin_credential();
    credential.identity.role = Role::Staff;
    client.guard().store_credential(&credential).unwrap();

    let err = client.guard().require_session(Role::Admin).unwrap_err();
    assert!(matches!(
        err,
        SessionError::RoleMismatch {
            required: Role::Admin,
            actual: Role::Staff
        }
    ));
    assert_eq!(navigator.redirects(), 1);
}

#[test]
fn test_gate_without_token_redirects() {
    let (client, _, navigator) = client(FakeTransport::new());
    assert!(matches!(
        client.guard().require_session(Role::Admin),
        Err(SessionError::MissingCredential)
    ));
    assert_eq!(navigator.redirects(), 1);
}

#[test]
fn test_logout_clears_credential() {
    let (client, _, navigator) = client(FakeTransport::new());
    client.guard().store_credential(&admin_credential()).unwrap();
    session::logout(client.guard()).unwrap();
    assert_eq!(client.guard().token(), None);
    assert_eq!(navigator.redirects(), 1);
    assert!(session::whoami(client.guard()).is_err());
}
