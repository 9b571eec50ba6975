use super::*;

fn user(role: Option<&str>) -> User {
    User {
        id: 1,
        display_name: "alice".to_owned(),
        email: None,
        avatar_url: None,
        role: role.map(str::to_owned),
    }
}

#[test]
fn default_state_is_logged_out() {
    let state = AuthState::default();
    assert!(!state.is_authenticated());
    assert_eq!(state.user_id(), None);
}

#[test]
fn user_id_comes_from_the_session_user() {
    let state = AuthState { user: Some(user(None)), loading: false };
    assert!(state.is_authenticated());
    assert_eq!(state.user_id(), Some(1));
}

#[test]
fn authoring_requires_the_admin_role() {
    let admin = AuthState { user: Some(user(Some("ADMIN"))), loading: false };
    let player = AuthState { user: Some(user(Some("user"))), loading: false };
    let no_role = AuthState { user: Some(user(None)), loading: false };

    assert!(admin.can_author());
    assert!(!player.can_author());
    assert!(!no_role.can_author());
}
