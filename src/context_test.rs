use super::*;
use crate::state::session::SESSION_STORAGE_KEY;
use crate::test_support::{NOW_MS, NOW_SECS, StubTransport};
use crate::util::clock::ManualClock;
use crate::util::navigation::NavigationCheck;
use crate::util::storage::MemoryStorage;

fn make_context() -> (StubTransport, MemoryStorage, Arc<ManualClock>, ClientContext<StubTransport>) {
    let transport = StubTransport::new();
    let storage = MemoryStorage::new();
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let ctx = ClientContext::new(
        ClientConfig::new("http://api.test/api/v1"),
        Arc::new(storage.clone()),
        transport.clone(),
        clock.clone(),
    );
    (transport, storage, clock, ctx)
}

#[tokio::test]
async fn expired_token_on_navigation_logs_out_through_bus() {
    let (transport, storage, clock, ctx) = make_context();
    transport.respond_json(200, &serde_json::json!({ "access_token": "abc", "exp": NOW_SECS + 60 }));

    ctx.auth.login("555-0100", "secret").await.unwrap();
    assert_eq!(ctx.navigation.handle_navigation("/profile"), NavigationCheck::Valid);
    assert!(ctx.session.is_authenticated());

    clock.advance(120_000);
    assert_eq!(ctx.navigation.handle_navigation("/profile"), NavigationCheck::Expired);

    assert_eq!(ctx.session.current(), None);
    assert_eq!(storage.get_item(SESSION_STORAGE_KEY), None);
    assert_eq!(ctx.notifications.message(), "");
    assert_eq!(ctx.navigation.handle_navigation("/login"), NavigationCheck::NoSession);
}

#[tokio::test]
async fn navigation_clears_login_notification() {
    let (transport, _storage, _clock, ctx) = make_context();
    transport.respond_json(401, &serde_json::json!({ "detail": "Incorrect username or password" }));

    let _ = ctx.auth.login("555-0100", "wrong").await;
    assert_eq!(ctx.notifications.message(), "Incorrect username or password");

    ctx.navigation.handle_navigation("/register");
    assert_eq!(ctx.notifications.message(), "");
}

#[test]
fn hydrates_session_written_by_previous_load() {
    let storage = MemoryStorage::new();
    storage
        .set_item(
            SESSION_STORAGE_KEY,
            &serde_json::json!({ "access_token": "abc", "exp": NOW_SECS + 60 }).to_string(),
        )
        .unwrap();

    let ctx = ClientContext::new(
        ClientConfig::default(),
        Arc::new(storage),
        StubTransport::new(),
        Arc::new(ManualClock::new(NOW_MS)),
    );

    assert_eq!(ctx.session.current().map(|s| s.token).as_deref(), Some("abc"));
}

#[test]
fn unbind_logout_detaches_auth_client() {
    let (_transport, _storage, _clock, ctx) = make_context();
    assert_eq!(ctx.bus.handler_count(), 1);

    assert!(ctx.unbind_logout());

    assert_eq!(ctx.bus.handler_count(), 0);
    assert!(!ctx.clone().unbind_logout());
}
