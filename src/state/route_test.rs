use super::*;

#[test]
fn starts_at_initial_location_with_empty_history() {
    let route = RouteState::new("/dashboard");
    assert_eq!(route.current(), "/dashboard");
    assert!(route.history().is_empty());
}

#[test]
fn navigate_moves_and_records_previous_location() {
    let route = RouteState::new("/dashboard");
    route.navigate("/transfers");
    route.navigate("/auth/login");

    assert_eq!(route.current(), "/auth/login");
    assert_eq!(route.history(), vec!["/dashboard", "/transfers"]);
    assert!(route.is_at("/auth/login"));
}

#[test]
fn navigate_to_current_location_is_a_no_op() {
    let route = RouteState::new("/auth/login");
    route.navigate("/auth/login");
    assert!(route.history().is_empty());
}

#[test]
fn default_is_root() {
    assert_eq!(RouteState::default().current(), "/");
}
