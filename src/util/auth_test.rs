use super::*;
use crate::net::types::User;

fn user() -> User {
    User {
        id: 1,
        display_name: "alice".to_owned(),
        email: None,
        avatar_url: None,
        role: None,
    }
}

#[test]
fn probe_in_flight_never_redirects() {
    let auth = AuthState { user: None, loading: true };
    assert!(!session_missing(&auth));
}

#[test]
fn settled_signed_out_redirects() {
    let auth = AuthState { user: None, loading: false };
    assert!(session_missing(&auth));
}

#[test]
fn settled_with_a_session_stays_put() {
    let auth = AuthState { user: Some(user()), loading: false };
    assert!(!session_missing(&auth));
}
