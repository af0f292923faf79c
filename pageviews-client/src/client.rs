//! Public entry point.

use std::fmt;
use std::sync::Arc;

use pageviews_core::{
    AggregatePageViewRequest, ApiHeader, PerArticlePageViewRequest, Table, TopViewedArticleRequest,
    TopViewedCountryRequest, TopViewedPerCountryRequest, ValidityWindows,
};
use pageviews_fetch::{EndpointSet, FetchError, HttpClient, HttpSettings, JsonTransport};
use tracing::{info, instrument};

use crate::context::RequestContext;
use crate::error::PageViewError;
use crate::{aggregate, article, top};

// ============================================================================
// Client
// ============================================================================

/// Typed client for one Wikimedia project, e.g. `en.wikipedia`.
///
/// Every operation validates its request completely before the first
/// request is sent, and fails as a whole if any request fails.
pub struct PageViewClient {
    project: String,
    header: ApiHeader,
    transport: Arc<dyn JsonTransport>,
    windows: ValidityWindows,
    endpoints: EndpointSet,
}

impl PageViewClient {
    /// Creates a client backed by the reqwest transport.
    pub fn new(project: impl Into<String>, header: ApiHeader) -> Result<Self, FetchError> {
        Self::with_settings(project, header, &HttpSettings::default())
    }

    /// Creates a client backed by the reqwest transport with custom settings.
    pub fn with_settings(
        project: impl Into<String>,
        header: ApiHeader,
        settings: &HttpSettings,
    ) -> Result<Self, FetchError> {
        Ok(Self::with_transport(project, header, HttpClient::with_settings(settings)?))
    }

    /// Creates a client over any transport.
    pub fn with_transport(
        project: impl Into<String>,
        header: ApiHeader,
        transport: impl JsonTransport + 'static,
    ) -> Self {
        Self {
            project: project.into(),
            header,
            transport: Arc::new(transport),
            windows: ValidityWindows::default(),
            endpoints: EndpointSet::default(),
        }
    }

    /// Replaces the validity windows.
    #[must_use]
    pub fn with_windows(mut self, windows: ValidityWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Replaces the endpoint templates.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: EndpointSet) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Project every request targets.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Validity windows in effect.
    pub fn windows(&self) -> &ValidityWindows {
        &self.windows
    }

    /// Endpoint templates in effect.
    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// Identification headers sent with every request.
    pub fn header(&self) -> &ApiHeader {
        &self.header
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            transport: self.transport.as_ref(),
            endpoints: &self.endpoints,
            header: &self.header,
            project: &self.project,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Aggregated pageviews of the project over a date range.
    ///
    /// Ranges before 2015-07-01 are served by the legacy pagecounts source,
    /// whose rows are renamed to the current schema. Combined mobile access
    /// is fetched as app plus web from the current source.
    #[instrument(skip(self), fields(project = %self.project))]
    pub async fn get_aggregated_pageviews(
        &self,
        request: &AggregatePageViewRequest,
    ) -> Result<Table, PageViewError> {
        let table = aggregate::aggregated(self.context(), &self.windows, request).await?;
        info!(rows = table.len(), "Fetched aggregated pageviews");
        Ok(table)
    }

    /// Pageviews of one article over a date range.
    #[instrument(skip(self), fields(project = %self.project))]
    pub async fn get_per_article_pageviews(
        &self,
        request: &PerArticlePageViewRequest,
    ) -> Result<Table, PageViewError> {
        let table = article::per_article(self.context(), &self.windows, request).await?;
        info!(rows = table.len(), "Fetched per-article pageviews");
        Ok(table)
    }

    /// The most viewed articles of the project for a day or month.
    #[instrument(skip(self), fields(project = %self.project))]
    pub async fn get_top_pageviews(
        &self,
        request: &TopViewedArticleRequest,
    ) -> Result<Table, PageViewError> {
        let table = top::top_articles(self.context(), &self.windows, request).await?;
        info!(rows = table.len(), "Fetched top articles");
        Ok(table)
    }

    /// Pageviews of the project split by country for a month.
    #[instrument(skip(self), fields(project = %self.project))]
    pub async fn get_top_viewed_country(
        &self,
        request: &TopViewedCountryRequest,
    ) -> Result<Table, PageViewError> {
        let table = top::top_countries(self.context(), &self.windows, request).await?;
        info!(rows = table.len(), "Fetched top countries");
        Ok(table)
    }

    /// The most viewed articles in one country for a day or month.
    ///
    /// A whole month costs one request per day; the daily lists are summed
    /// and re-ranked. This operation does not filter by the client's project.
    #[instrument(skip(self))]
    pub async fn get_top_view_per_country(
        &self,
        request: &TopViewedPerCountryRequest,
    ) -> Result<Table, PageViewError> {
        let table = top::top_per_country(self.context(), &self.windows, request).await?;
        info!(rows = table.len(), "Fetched top articles per country");
        Ok(table)
    }
}

impl fmt::Debug for PageViewClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageViewClient")
            .field("project", &self.project)
            .field("header", &self.header)
            .field("windows", &self.windows)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
