//! Reqwest-backed JSON transport.
//!
//! Every request carries the caller's `User-Agent` and `From` headers.
//! Non-2xx answers become [`FetchError::Status`] with the body attached.

use std::time::Duration;

use async_trait::async_trait;
use pageviews_core::ApiHeader;
use reqwest::{
    Client,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::endpoint::{Params, render_template};
use crate::error::FetchError;
use crate::transport::JsonTransport;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Settings
// ============================================================================

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpSettings {
    /// Settings with a timeout in whole seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(secs),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_TIMEOUT_SECS)
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper implementing [`JsonTransport`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a client with default settings.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(&HttpSettings::default())
    }

    /// Creates a client with custom settings.
    pub fn with_settings(settings: &HttpSettings) -> Result<Self, FetchError> {
        let inner = Client::builder().timeout(settings.timeout).build()?;
        debug!(timeout = ?settings.timeout, "HTTP client created");
        Ok(Self { inner })
    }

    /// Returns the inner reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

/// Builds the identification headers for one request.
pub fn identification_headers(api_header: &ApiHeader) -> Result<HeaderMap, FetchError> {
    let value = |name: &'static str, raw: &str| {
        HeaderValue::from_str(raw).map_err(|e| FetchError::InvalidHeader {
            name,
            reason: e.to_string(),
        })
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, value("User-Agent", &api_header.user_agent)?);
    headers.insert(header::FROM, value("From", &api_header.call_from)?);
    Ok(headers)
}

#[async_trait]
impl JsonTransport for HttpClient {
    #[instrument(skip(self, template, params, headers), fields(template = %template))]
    async fn fetch_json(
        &self,
        template: &str,
        params: &Params,
        headers: &ApiHeader,
    ) -> Result<Value, FetchError> {
        let url = render_template(template, params)?;
        let header_map = identification_headers(headers)?;
        debug!(url = %url, "GET request");

        let response = self.inner.get(&url).headers(header_map).send().await?;
        let status = response.status();
        debug!(status = %status, "Response received");

        let text = response.text().await?;
        if !status.is_success() {
            warn!(status = %status, url = %url, "Upstream returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
