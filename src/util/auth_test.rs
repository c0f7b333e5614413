use super::*;
use crate::net::types::{Role, User};
use crate::state::route::RouteState;

fn signed_in_as(role: Role) -> AuthState {
    AuthState {
        user: Some(User { id: 1, username: "alice".to_owned(), role, ..User::default() }),
        token: Some("jwt".to_owned()),
        loading: false,
        initialized: true,
    }
}

#[test]
fn should_redirect_unauth_when_settled_and_user_missing() {
    let state = AuthState { initialized: true, ..AuthState::default() };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_before_init() {
    assert!(!should_redirect_unauth(&AuthState::default()));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = AuthState { initialized: true, loading: true, ..AuthState::default() };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_redirect_when_token_is_empty() {
    let mut state = signed_in_as(Role::Client);
    state.token = Some(String::new());
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    assert!(!should_redirect_unauth(&signed_in_as(Role::Client)));
}

#[test]
fn non_admin_is_sent_away_from_admin_pages() {
    assert!(should_redirect_non_admin(&signed_in_as(Role::Client)));
    assert!(!should_redirect_non_admin(&signed_in_as(Role::Admin)));
}

#[test]
fn enforce_navigates_to_login_or_dashboard() {
    let route = RouteState::new("/admin/overview");
    let signed_out = AuthState { initialized: true, ..AuthState::default() };
    assert!(enforce(&signed_out, &route, "/auth/login", true));
    assert_eq!(route.current(), "/auth/login");

    let route = RouteState::new("/admin/overview");
    assert!(enforce(&signed_in_as(Role::Client), &route, "/auth/login", true));
    assert_eq!(route.current(), DASHBOARD_PATH);

    let route = RouteState::new("/admin/overview");
    assert!(!enforce(&signed_in_as(Role::Admin), &route, "/auth/login", true));
    assert_eq!(route.current(), "/admin/overview");
}
