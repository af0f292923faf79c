//! Shared state handed to every fetcher.

use pageviews_core::ApiHeader;
use pageviews_fetch::{Endpoint, EndpointSet, FetchError, JsonTransport, Params};
use serde_json::Value;
use tracing::debug;

/// Borrowed view of a client for the duration of one operation.
#[derive(Clone, Copy)]
pub(crate) struct RequestContext<'a> {
    pub transport: &'a dyn JsonTransport,
    pub endpoints: &'a EndpointSet,
    pub header: &'a ApiHeader,
    pub project: &'a str,
}

impl RequestContext<'_> {
    /// Fetches one endpoint.
    pub async fn fetch(&self, endpoint: Endpoint, params: &Params) -> Result<Value, FetchError> {
        debug!(endpoint = %endpoint, ?params, "Fetching");
        self.transport
            .fetch_json(&self.endpoints.template(endpoint), params, self.header)
            .await
    }
}
