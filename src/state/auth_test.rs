use super::*;
use crate::state::session::{SessionRecord, UserIdentity};

fn make_session(phone: Option<&str>) -> Session {
    Session::from_record(SessionRecord {
        access_token: "abc".to_owned(),
        token_type: None,
        refresh_token: None,
        exp: Some(1_700_000_000),
        identity: UserIdentity {
            phone: phone.map(str::to_owned),
            ..UserIdentity::default()
        },
    })
    .unwrap()
}

#[test]
fn should_redirect_unauth_when_session_missing() {
    let state = AuthState::default();
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_session_exists() {
    let state = AuthState::from_session(Some(make_session(Some("555-0100"))));
    assert!(!should_redirect_unauth(&state));
    assert!(state.is_logged_in());
}

#[test]
fn display_name_uses_identity_or_fallback() {
    assert_eq!(AuthState::from_session(Some(make_session(Some("555-0100")))).display_name(), "555-0100");
    assert_eq!(AuthState::from_session(Some(make_session(None))).display_name(), "Profile");
    assert_eq!(AuthState::default().display_name(), "Profile");
}
