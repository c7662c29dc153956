use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use super::*;
use crate::net::transport::RequestBody;
use crate::state::notification::MessageKind;
use crate::state::session::SESSION_STORAGE_KEY;
use crate::test_support::{NOW_SECS, QuotaStorage, StubTransport, unsigned_token};
use crate::util::storage::{KeyValueStorage, MemoryStorage};

const STRONG_SECRET: &str = "Secret1!";

// =============================================================================
// Helpers
// =============================================================================

struct Harness {
    transport: StubTransport,
    storage: MemoryStorage,
    session: Arc<SessionStore>,
    notifications: Arc<NotificationStore>,
    client: AuthClient<StubTransport>,
}

fn harness_with(transport: StubTransport) -> Harness {
    let storage = MemoryStorage::new();
    let session = Arc::new(SessionStore::init(Arc::new(storage.clone())));
    let notifications = Arc::new(NotificationStore::new());
    let client = AuthClient::new(
        ClientConfig::new("http://api.test/api/v1"),
        transport.clone(),
        session.clone(),
        notifications.clone(),
    );
    Harness { transport, storage, session, notifications, client }
}

fn harness() -> Harness {
    harness_with(StubTransport::new())
}

fn opaque_login_body(token: &str) -> serde_json::Value {
    serde_json::json!({ "access_token": token, "token_type": "bearer", "exp": NOW_SECS + 3600 })
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_applies_session_then_logout_clears_it() {
    let h = harness();
    h.transport.respond_json(200, &opaque_login_body("abc"));

    let session = h.client.login("555-0100", "secret").await.unwrap();

    assert_eq!(session.token, "abc");
    assert_eq!(h.session.current().map(|s| s.token).as_deref(), Some("abc"));
    assert!(h.storage.get_item(SESSION_STORAGE_KEY).is_some());
    assert_eq!(h.notifications.message(), LOGIN_SUCCEEDED);
    assert_eq!(h.notifications.kind(), Some(MessageKind::Success));

    h.client.logout();

    assert_eq!(h.session.current(), None);
    assert_eq!(h.storage.get_item(SESSION_STORAGE_KEY), None);
}

#[tokio::test]
async fn login_posts_form_credentials_to_login_endpoint() {
    let h = harness();
    h.transport.respond_json(200, &opaque_login_body("abc"));

    h.client.login("  555-0100 ", "secret").await.unwrap();

    let sent = h.transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "http://api.test/api/v1/auth/login");
    assert_eq!(sent[0].authorization, None);
    assert_eq!(
        sent[0].body,
        RequestBody::Form(vec![
            ("username".to_owned(), "555-0100".to_owned()),
            ("password".to_owned(), "secret".to_owned()),
        ])
    );
}

#[tokio::test]
async fn login_decodes_jwt_and_fills_username() {
    let h = harness();
    let token = unsigned_token(&serde_json::json!({ "sub": "a@b.com", "exp": NOW_SECS + 60 }));
    h.transport.respond_json(200, &serde_json::json!({ "access_token": token, "token_type": "bearer" }));

    let session = h.client.login("555-0100", "secret").await.unwrap();

    assert_eq!(session.claims.exp, NOW_SECS + 60);
    assert_eq!(session.identity.username.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn login_rejection_shows_server_message_and_keeps_session() {
    let h = harness();
    h.transport.respond_json(400, &serde_json::json!({ "message": "X" }));

    let err = h.client.login("555-0100", "secret").await.unwrap_err();

    assert_eq!(err.message, "X");
    assert!(matches!(err.source, ApiError::Rejected { status: 400, .. }));
    assert_eq!(h.notifications.message(), "X");
    assert_eq!(h.notifications.kind(), Some(MessageKind::Error));
    assert_eq!(h.session.current(), None);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn login_network_failure_uses_generic_message() {
    let h = harness();
    h.transport.fail_network("connection refused");

    let err = h.client.login("555-0100", "secret").await.unwrap_err();

    assert_eq!(err.message, "No Server Response");
    assert_eq!(h.notifications.message(), "No Server Response");
    assert_eq!(h.session.current(), None);
}

#[tokio::test]
async fn login_failure_does_not_touch_existing_session() {
    let h = harness();
    h.transport
        .respond_json(200, &opaque_login_body("first"))
        .respond_json(401, &serde_json::json!({ "detail": "Incorrect username or password" }));

    h.client.login("555-0100", "secret").await.unwrap();
    let err = h.client.login("555-0100", "wrong").await.unwrap_err();

    assert_eq!(err.message, "Incorrect username or password");
    assert_eq!(h.session.current().map(|s| s.token).as_deref(), Some("first"));
}

#[tokio::test]
async fn login_fails_when_session_cannot_be_persisted() {
    let transport = StubTransport::new();
    let storage = QuotaStorage::allowing(1);
    let session = Arc::new(SessionStore::init(Arc::new(storage.clone())));
    let notifications = Arc::new(NotificationStore::new());
    let client = AuthClient::new(
        ClientConfig::new("http://api.test/api/v1"),
        transport.clone(),
        session.clone(),
        notifications.clone(),
    );
    transport
        .respond_json(200, &opaque_login_body("first"))
        .respond_json(200, &opaque_login_body("second"));

    client.login("555-0100", "secret").await.unwrap();
    let err = client.login("555-0199", "secret").await.unwrap_err();

    assert!(matches!(err.source, ApiError::Storage(_)));
    assert_eq!(notifications.message(), crate::net::error::SESSION_NOT_SAVED);
    assert_eq!(notifications.kind(), Some(MessageKind::Error));
    assert_eq!(session.current().map(|s| s.token).as_deref(), Some("first"));
    let stored = storage.get_item(SESSION_STORAGE_KEY).unwrap();
    assert!(stored.contains("\"first\""));
}

#[tokio::test]
async fn login_with_undecodable_token_fails() {
    let h = harness();
    h.transport.respond_json(200, &serde_json::json!({ "access_token": "opaque" }));

    let err = h.client.login("555-0100", "secret").await.unwrap_err();

    assert!(matches!(err.source, ApiError::InvalidToken(_)));
    assert_eq!(h.notifications.message(), err.message);
    assert_eq!(h.session.current(), None);
}

#[tokio::test]
async fn blank_login_input_never_reaches_transport() {
    let h = harness();

    let err = h.client.login("   ", "secret").await.unwrap_err();

    assert_eq!(err.message, "Invalid Entry");
    assert!(matches!(err.source, ApiError::InvalidEntry));
    assert!(h.transport.requests().is_empty());
    assert_eq!(h.notifications.message(), "Invalid Entry");
}

// =============================================================================
// Register
// =============================================================================

#[tokio::test]
async fn register_posts_json_and_uses_server_message() {
    let h = harness();
    h.transport.respond_json(201, &serde_json::json!({ "message": "User created" }));

    let message = h.client.register("555-0100", "a@b.com", STRONG_SECRET).await.unwrap();

    assert_eq!(message, "User created");
    assert_eq!(h.notifications.message(), "User created");
    let sent = &h.transport.requests()[0];
    assert_eq!(sent.url, "http://api.test/api/v1/users");
    assert_eq!(
        sent.body,
        RequestBody::Json(serde_json::json!({
            "phone": "555-0100",
            "email": "a@b.com",
            "password": STRONG_SECRET
        }))
    );
}

#[tokio::test]
async fn register_falls_back_to_default_success_text() {
    let h = harness();
    h.transport.respond_json(201, &serde_json::json!({ "user_id": 9 }));

    let message = h.client.register("555-0100", "a@b.com", STRONG_SECRET).await.unwrap();

    assert_eq!(message, REGISTRATION_SUCCEEDED);
}

#[tokio::test]
async fn register_never_mutates_session() {
    let h = harness();
    h.transport
        .respond_json(201, &opaque_login_body("should-not-apply"))
        .respond_json(409, &serde_json::json!({ "detail": "Phone already registered" }));

    h.client.register("555-0100", "a@b.com", STRONG_SECRET).await.unwrap();
    assert_eq!(h.session.current(), None);

    let err = h.client.register("555-0100", "a@b.com", STRONG_SECRET).await.unwrap_err();
    assert_eq!(err.message, "Phone already registered");
    assert_eq!(h.session.current(), None);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn weak_registration_input_never_reaches_transport() {
    let h = harness();

    let weak = h.client.register("555-0100", "a@b.com", "password").await.unwrap_err();
    let bad_email = h.client.register("555-0100", "not-an-email", STRONG_SECRET).await.unwrap_err();

    assert_eq!(weak.message, "Invalid Entry");
    assert_eq!(bad_email.message, "Invalid Entry");
    assert!(h.transport.requests().is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn login_resolving_after_logout_wins() {
    let gate = Arc::new(Notify::new());
    let h = harness_with(StubTransport::gated(gate.clone()));
    h.transport.respond_json(200, &opaque_login_body("late"));

    let interleave = async {
        while h.transport.requests().is_empty() {
            tokio::task::yield_now().await;
        }
        h.client.logout();
        assert_eq!(h.session.current(), None);
        gate.notify_one();
    };
    let (result, ()) = tokio::join!(h.client.login("555-0100", "secret"), interleave);

    assert!(result.is_ok());
    assert_eq!(h.session.current().map(|s| s.token).as_deref(), Some("late"));
    assert!(h.storage.get_item(SESSION_STORAGE_KEY).is_some());
}

// =============================================================================
// Logout bridge
// =============================================================================

#[tokio::test]
async fn bound_logout_handler_signs_out_on_emit() {
    let h = harness();
    h.transport.respond_json(200, &opaque_login_body("abc"));
    h.client.login("555-0100", "secret").await.unwrap();
    let bus = EventBus::<()>::new();
    let observed = Arc::new(AtomicUsize::new(0));
    {
        let observed = Arc::clone(&observed);
        h.session.subscribe(move |session| {
            if session.is_none() {
                observed.fetch_add(1, Ordering::SeqCst);
            }
        });
    }

    let id = h.client.bind_logout(&bus);
    assert_eq!(bus.emit(LOGOUT_EVENT, &()), 1);

    assert_eq!(h.session.current(), None);
    assert_eq!(h.storage.get_item(SESSION_STORAGE_KEY), None);
    assert_eq!(observed.load(Ordering::SeqCst), 1);

    assert!(bus.off_handler(id));
    assert_eq!(bus.emit(LOGOUT_EVENT, &()), 0);
}
