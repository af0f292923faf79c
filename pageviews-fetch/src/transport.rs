//! Transport seam between the pageviews client and the network.

use async_trait::async_trait;
use pageviews_core::ApiHeader;
use serde_json::Value;

use crate::endpoint::Params;
use crate::error::FetchError;

/// Fetches a JSON document for a URL template.
///
/// Implementations fill `template` from `params`, send `headers` along, and
/// return the decoded body. The HTTP implementation is
/// [`HttpClient`](crate::HttpClient); tests substitute canned responses.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// Performs one GET request.
    async fn fetch_json(
        &self,
        template: &str,
        params: &Params,
        headers: &ApiHeader,
    ) -> Result<Value, FetchError>;
}

#[async_trait]
impl<T: JsonTransport + ?Sized> JsonTransport for std::sync::Arc<T> {
    async fn fetch_json(
        &self,
        template: &str,
        params: &Params,
        headers: &ApiHeader,
    ) -> Result<Value, FetchError> {
        (**self).fetch_json(template, params, headers).await
    }
}
