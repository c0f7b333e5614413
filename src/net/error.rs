//! Failure taxonomy for gateway calls.
//!
//! Authentication failures are a distinct variant because the pipeline has
//! already reacted to them (session cleared, login navigation issued) by the
//! time the caller sees the error.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use reqwest::StatusCode;

/// Errors produced by API gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured origin or a derived endpoint could not form a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend rejected the credentials or token.
    #[error("authentication required")]
    Unauthorized { body: String },

    /// The backend returned a non-success status other than 401.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Stable machine-readable code for logs and notifications.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "E_INVALID_URL",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_REQUEST",
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::Status { status: 403, .. } => "E_FORBIDDEN",
            Self::Status { status: 404, .. } => "E_NOT_FOUND",
            Self::Status { status: 400..=499, .. } => "E_REJECTED",
            Self::Status { .. } => "E_SERVER",
            Self::Parse(_) => "E_PARSE",
        }
    }

    /// Whether this is the globally intercepted authentication failure.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status attached to the failure, if the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a user-facing notification. The backend sends plain
    /// `"Error: ..."` strings for rejected requests; those are shown as-is.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { body, .. } if !body.trim().is_empty() => body.trim().trim_matches('"').to_owned(),
            Self::Unauthorized { .. } => "Your session has expired. Please log in again.".to_owned(),
            Self::Request(_) => "Could not reach the banking service.".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
