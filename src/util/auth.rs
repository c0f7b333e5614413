//! Shared route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page applies the same redirect rules: signed-out users go
//! to the login entry point, signed-in non-admins leave admin pages for the
//! dashboard. Guards hold off until the session store has initialized and
//! while a session mutator is in flight.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::pipeline::Navigator;
use crate::state::auth::AuthState;

/// Landing page for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";

fn settled(state: &AuthState) -> bool {
    state.initialized && !state.loading
}

fn signed_in(state: &AuthState) -> bool {
    state.user.is_some() && state.token.as_deref().is_some_and(|t| !t.is_empty())
}

/// Whether a protected page should send the user to the login entry point.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    settled(state) && !signed_in(state)
}

/// Whether an admin page should send a signed-in non-admin to the dashboard.
#[must_use]
pub fn should_redirect_non_admin(state: &AuthState) -> bool {
    settled(state) && signed_in(state) && !state.user.as_ref().is_some_and(|u| u.is_admin())
}

/// Apply both guards for a page. Returns `true` when a redirect was issued.
pub fn enforce(state: &AuthState, navigator: &dyn Navigator, login_path: &str, requires_admin: bool) -> bool {
    if should_redirect_unauth(state) {
        navigator.navigate(login_path);
        return true;
    }
    if requires_admin && should_redirect_non_admin(state) {
        navigator.navigate(DASHBOARD_PATH);
        return true;
    }
    false
}
