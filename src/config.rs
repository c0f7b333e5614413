//! Portal configuration parsed from environment variables.
//!
//! Parsing goes through a lookup function so tests can feed values without
//! touching the process environment.

use std::path::PathBuf;

use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_SESSION_FILE: &str = ".bankportal/session.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building a [`PortalConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The backend origin is not an absolute http(s) URL.
    #[error("invalid base URL `{value}`: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    /// A numeric setting could not be parsed.
    #[error("invalid value for {key}: `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Fixed origin every API call is resolved against.
    pub base_url: Url,
    /// Location the application is sent to on authentication failure.
    pub login_path: String,
    /// File backing the persisted session for the terminal front-end.
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
}

impl PortalConfig {
    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `BANKPORTAL_BASE_URL`: backend origin, default `http://localhost:8080`
    /// - `BANKPORTAL_LOGIN_PATH`: default `/auth/login`
    /// - `BANKPORTAL_SESSION_FILE`: default `.bankportal/session.json`
    /// - `BANKPORTAL_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BANKPORTAL_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or a timeout is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or a timeout is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = parse_base_url(lookup("BANKPORTAL_BASE_URL").as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let login_path = lookup("BANKPORTAL_LOGIN_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());
        let session_file = lookup("BANKPORTAL_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: parse_u64(
                "BANKPORTAL_REQUEST_TIMEOUT_SECS",
                lookup("BANKPORTAL_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_u64(
                "BANKPORTAL_CONNECT_TIMEOUT_SECS",
                lookup("BANKPORTAL_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self { base_url, login_path, session_file, timeouts })
    }

    /// Replace the backend origin, validating it the same way as the env value.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an absolute http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }
}

/// Parse and normalize a backend origin. Trailing slashes are dropped so paths
/// like `/api/accounts` join cleanly.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl { value: raw.to_owned(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

fn parse_u64(key: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
