use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// from_lookup
// =============================================================================

#[test]
fn from_lookup_defaults_when_nothing_set() {
    let cfg = PortalConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg.base_url.as_str(), "http://localhost:8080/");
    assert_eq!(cfg.login_path, DEFAULT_LOGIN_PATH);
    assert_eq!(cfg.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    assert_eq!(cfg.timeouts, Timeouts::default());
}

#[test]
fn default_base_url_parses() {
    assert!(parse_base_url(DEFAULT_BASE_URL).is_ok());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = PortalConfig::from_lookup(lookup_from(&[
        ("BANKPORTAL_BASE_URL", "https://bank.example.test/"),
        ("BANKPORTAL_LOGIN_PATH", "/signin"),
        ("BANKPORTAL_SESSION_FILE", "/tmp/portal.json"),
        ("BANKPORTAL_REQUEST_TIMEOUT_SECS", "42"),
        ("BANKPORTAL_CONNECT_TIMEOUT_SECS", " 7 "),
    ]))
    .unwrap();

    assert_eq!(cfg.base_url.as_str(), "https://bank.example.test/");
    assert_eq!(cfg.login_path, "/signin");
    assert_eq!(cfg.session_file, PathBuf::from("/tmp/portal.json"));
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn from_lookup_blank_values_fall_back_to_defaults() {
    let cfg = PortalConfig::from_lookup(lookup_from(&[
        ("BANKPORTAL_LOGIN_PATH", "  "),
        ("BANKPORTAL_REQUEST_TIMEOUT_SECS", ""),
    ]))
    .unwrap();
    assert_eq!(cfg.login_path, DEFAULT_LOGIN_PATH);
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn from_lookup_rejects_bad_timeout() {
    let err = PortalConfig::from_lookup(lookup_from(&[("BANKPORTAL_CONNECT_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { key: "BANKPORTAL_CONNECT_TIMEOUT_SECS", .. }));
    assert!(err.to_string().contains("soon"));
}

#[test]
fn from_lookup_rejects_relative_base_url() {
    let err = PortalConfig::from_lookup(lookup_from(&[("BANKPORTAL_BASE_URL", "localhost")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
}

// =============================================================================
// parse_base_url
// =============================================================================

#[test]
fn parse_base_url_strips_trailing_slashes() {
    let url = parse_base_url("http://127.0.0.1:9000///").unwrap();
    assert_eq!(url.join("/api/accounts").unwrap().as_str(), "http://127.0.0.1:9000/api/accounts");
}

#[test]
fn parse_base_url_rejects_non_http_scheme() {
    let err = parse_base_url("ftp://bank.example.test").unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn with_base_url_replaces_origin() {
    let cfg = PortalConfig::from_lookup(|_| None).unwrap().with_base_url("http://10.0.0.5:8081").unwrap();
    assert_eq!(cfg.base_url.host_str(), Some("10.0.0.5"));
    assert_eq!(cfg.base_url.port(), Some(8081));
}
