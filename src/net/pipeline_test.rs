use super::*;
use crate::net::storage::{MemoryStorage, USER_KEY};
use crate::state::route::RouteState;

fn pipeline_with(storage: &Arc<MemoryStorage>, route: &Arc<RouteState>) -> RequestPipeline {
    RequestPipeline::new(storage.clone(), route.clone(), "/auth/login")
}

fn auth_header(pipeline: &RequestPipeline) -> Option<String> {
    let builder = reqwest::Client::new().get("http://127.0.0.1:9/api/accounts");
    let request = pipeline.attach_auth(builder).build().unwrap();
    request
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().unwrap().to_owned())
}

// =============================================================================
// attach_auth
// =============================================================================

#[test]
fn attach_auth_adds_bearer_when_token_present() {
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "jwt-123")]));
    let route = Arc::new(RouteState::new("/dashboard"));
    assert_eq!(auth_header(&pipeline_with(&storage, &route)).as_deref(), Some("Bearer jwt-123"));
}

#[test]
fn attach_auth_omits_header_without_token() {
    let storage = Arc::new(MemoryStorage::new());
    let route = Arc::new(RouteState::new("/dashboard"));
    assert_eq!(auth_header(&pipeline_with(&storage, &route)), None);
}

#[test]
fn attach_auth_omits_header_for_blank_token() {
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "  ")]));
    let route = Arc::new(RouteState::new("/dashboard"));
    assert_eq!(auth_header(&pipeline_with(&storage, &route)), None);
}

#[test]
fn attach_auth_reads_token_at_call_time() {
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "first")]));
    let route = Arc::new(RouteState::new("/dashboard"));
    let pipeline = pipeline_with(&storage, &route);
    assert_eq!(auth_header(&pipeline).as_deref(), Some("Bearer first"));

    storage.remove(TOKEN_KEY).unwrap();
    assert_eq!(auth_header(&pipeline), None);

    storage.set(TOKEN_KEY, "second").unwrap();
    assert_eq!(auth_header(&pipeline).as_deref(), Some("Bearer second"));
}

// =============================================================================
// handle_auth_failure
// =============================================================================

#[test]
fn handle_auth_failure_clears_session_and_navigates_on_401() {
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "t"), (USER_KEY, "{}")]));
    let route = Arc::new(RouteState::new("/transfers"));
    let pipeline = pipeline_with(&storage, &route);

    assert!(pipeline.handle_auth_failure(StatusCode::UNAUTHORIZED));
    assert!(storage.is_empty());
    assert_eq!(route.current(), "/auth/login");
}

#[test]
fn handle_auth_failure_ignores_other_statuses() {
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "t"), (USER_KEY, "{}")]));
    let route = Arc::new(RouteState::new("/transfers"));
    let pipeline = pipeline_with(&storage, &route);

    for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
        assert!(!pipeline.handle_auth_failure(status), "unexpected handling for {status}");
    }
    assert_eq!(storage.len(), 2);
    assert_eq!(route.current(), "/transfers");
}

#[test]
fn handle_auth_failure_without_session_still_navigates() {
    let storage = Arc::new(MemoryStorage::new());
    let route = Arc::new(RouteState::new("/"));
    let pipeline = pipeline_with(&storage, &route);

    assert!(pipeline.handle_auth_failure(StatusCode::UNAUTHORIZED));
    assert_eq!(route.current(), "/auth/login");
}

// =============================================================================
// execute
// =============================================================================

#[tokio::test]
async fn execute_reports_transport_failure() {
    let storage = Arc::new(MemoryStorage::new());
    let route = Arc::new(RouteState::new("/"));
    let pipeline = pipeline_with(&storage, &route);

    // Port 9 (discard) is not expected to accept HTTP connections locally.
    let err = pipeline
        .execute(reqwest::Client::new().get("http://127.0.0.1:9/api/accounts"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Request(_)), "got {err:?}");
    assert_eq!(route.current(), "/");
}
