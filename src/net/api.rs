//! Typed gateway to the banking backend.
//!
//! ARCHITECTURE
//! ============
//! One `reqwest::Client` is built per `ApiClient` with the fixed base origin,
//! a JSON content type and the configured timeouts. Resource groups
//! (`auth()`, `accounts()`, ...) are borrowed views that map a logical
//! operation to verb + path + body/query and decode the typed response.
//!
//! ERROR HANDLING
//! ==============
//! 401 is handled by the pipeline. Every other non-success status becomes
//! `ApiError::Status` carrying the backend body for page-level display. No
//! call is cached or retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::api_accounts::AccountsApi;
use super::api_admin::AdminApi;
use super::api_auth::AuthApi;
use super::api_profile::ProfileApi;
use super::api_transactions::TransactionsApi;
use super::api_transfers::TransfersApi;
use super::error::ApiError;
use super::pipeline::{Navigator, RequestPipeline};
use super::storage::SessionStorage;
use crate::config::PortalConfig;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    pipeline: RequestPipeline,
}

impl ApiClient {
    /// Build the gateway from config plus the shared session storage and
    /// navigator.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        config: &PortalConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        let pipeline = RequestPipeline::new(storage, navigator, config.login_path.clone());
        Ok(Self { http, base_url: config.base_url.clone(), pipeline })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    #[must_use]
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    #[must_use]
    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    #[must_use]
    pub fn transfers(&self) -> TransfersApi<'_> {
        TransfersApi::new(self)
    }

    #[must_use]
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    #[must_use]
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    // =========================================================================
    // REQUEST HELPERS
    // =========================================================================

    /// Resolve an absolute API path against the base origin.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Resolve `prefix` and append `segment` as a single percent-encoded path
    /// segment (used for IBANs and reference numbers).
    pub(crate) fn endpoint_with_segment(&self, prefix: &str, segment: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(prefix)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{prefix}: base URL cannot carry a path")))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Run through the pipeline and turn non-success statuses into errors.
    pub(crate) async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build().map_err(ApiError::from)?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();
        let builder = RequestBuilder::from_parts(self.http.clone(), request);

        let response = match self.pipeline.execute(builder).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%method, %path, error = %e, "request failed");
                return Err(e);
            }
        };
        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    /// Dispatch and decode a JSON body.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.dispatch(request).await?;
        let text = response.text().await.map_err(ApiError::from)?;
        parse_json(&text)
    }

    /// Dispatch and return the body as text. A JSON string body is unwrapped.
    pub(crate) async fn fetch_text(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = self.dispatch(request).await?;
        let text = response.text().await.map_err(ApiError::from)?;
        Ok(unwrap_json_string(text))
    }

    /// Dispatch and discard the body.
    pub(crate) async fn fetch_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.dispatch(request).await.map(|_| ())
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

fn unwrap_json_string(text: String) -> String {
    match serde_json::from_str::<String>(&text) {
        Ok(inner) => inner,
        Err(_) => text,
    }
}
