//! Session guard shared by every authenticated route.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;

/// A page should bounce to `/login` only once the session probe has settled
/// signed-out. Redirecting while the probe is still in flight would bounce
/// users holding a valid session cookie.
#[must_use]
pub fn session_missing(auth: &AuthState) -> bool {
    !auth.loading && !auth.is_authenticated()
}

/// Send signed-out visitors to `/login` once the session probe settles.
pub fn require_session(auth: RwSignal<AuthState>) {
    let navigate = use_navigate();
    Effect::new(move || {
        if session_missing(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
