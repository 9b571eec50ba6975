//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The session itself lives in an
//! HTTP-only cookie; this mirrors the `/api/auth/me` answer.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
///
/// Provided via context as `RwSignal<AuthState>`.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    /// True while the initial session probe is still in flight.
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Whether the user may enter the content-authoring screens.
    #[must_use]
    pub fn can_author(&self) -> bool {
        self.user
            .as_ref()
            .and_then(|u| u.role.as_deref())
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    }
}
