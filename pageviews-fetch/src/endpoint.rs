//! Upstream endpoint templates and template rendering.
//!
//! Templates contain `{name}` slots that [`render_template`] fills from
//! [`Params`]. Slot values are inserted verbatim; callers encode them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;

/// Base URL of the Wikimedia REST API.
pub const DEFAULT_BASE_URL: &str = "https://wikimedia.org/api/rest_v1";

// ============================================================================
// Endpoint
// ============================================================================

/// Upstream endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Legacy pagecounts, aggregated over a project.
    AggregateLegacy,
    /// Pageviews, aggregated over a project.
    Aggregate,
    /// Pageviews of one article.
    PerArticle,
    /// Most viewed articles of a project.
    Top,
    /// Project pageviews split by country.
    TopByCountry,
    /// Most viewed articles in one country.
    TopPerCountry,
}

impl Endpoint {
    /// Returns all endpoints.
    pub fn all() -> &'static [Endpoint] {
        &[
            Self::AggregateLegacy,
            Self::Aggregate,
            Self::PerArticle,
            Self::Top,
            Self::TopByCountry,
            Self::TopPerCountry,
        ]
    }

    /// Path template relative to the base URL.
    pub fn path_template(&self) -> &'static str {
        match self {
            Self::AggregateLegacy => {
                "/metrics/legacy/pagecounts/aggregate/{project}/{access-site}/{granularity}/{start}/{end}"
            }
            Self::Aggregate => {
                "/metrics/pageviews/aggregate/{project}/{access}/{agent}/{granularity}/{start}/{end}"
            }
            Self::PerArticle => {
                "/metrics/pageviews/per-article/{project}/{access}/{agent}/{article}/{granularity}/{start}/{end}"
            }
            Self::Top => "/metrics/pageviews/top/{project}/{access}/{year}/{month}/{day}",
            Self::TopByCountry => "/metrics/pageviews/top-by-country/{project}/{access}/{year}/{month}",
            Self::TopPerCountry => {
                "/metrics/pageviews/top-per-country/{country}/{access}/{year}/{month}/{day}"
            }
        }
    }

    /// Short identifier used in logs.
    pub fn id(&self) -> &'static str {
        match self {
            Self::AggregateLegacy => "aggregate.legacy",
            Self::Aggregate => "aggregate",
            Self::PerArticle => "per_article",
            Self::Top => "top",
            Self::TopByCountry => "top_by_country",
            Self::TopPerCountry => "top_per_country",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ============================================================================
// Endpoint Set
// ============================================================================

/// Full URL templates for one API deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSet {
    base_url: String,
}

impl EndpointSet {
    /// Templates rooted at `base_url`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of this deployment.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL template for `endpoint`.
    pub fn template(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path_template())
    }
}

impl Default for EndpointSet {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// ============================================================================
// Params
// ============================================================================

/// Values for template slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a slot value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Value of a slot.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// All slots, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Fills every `{name}` slot of `template` and validates the resulting URL.
pub fn render_template(template: &str, params: &Params) -> Result<String, FetchError> {
    let mut rendered = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| FetchError::InvalidUrl(format!("unclosed slot in {template}")))?;
        let name = &after[..close];
        let value = params.get(name).ok_or_else(|| FetchError::MissingParameter {
            name: name.to_string(),
            template: template.to_string(),
        })?;
        rendered.push_str(value);
        rest = &after[close + 1..];
    }
    rendered.push_str(rest);

    Url::parse(&rendered).map_err(|e| FetchError::InvalidUrl(format!("{rendered}: {e}")))?;
    Ok(rendered)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates() {
        let endpoints = EndpointSet::default();
        assert_eq!(
            endpoints.template(Endpoint::TopByCountry),
            "https://wikimedia.org/api/rest_v1/metrics/pageviews/top-by-country/{project}/{access}/{year}/{month}"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let endpoints = EndpointSet::new("http://localhost:8080/api/");
        assert!(endpoints
            .template(Endpoint::Top)
            .starts_with("http://localhost:8080/api/metrics/pageviews/top/"));
    }

    #[test]
    fn test_render_template() {
        let params = Params::new()
            .with("project", "en.wikipedia")
            .with("access-site", "all-sites")
            .with("granularity", "monthly")
            .with("start", "2010010100")
            .with("end", "2015063023");
        let url = render_template(
            &EndpointSet::default().template(Endpoint::AggregateLegacy),
            &params,
        )
        .unwrap();
        assert_eq!(
            url,
            "https://wikimedia.org/api/rest_v1/metrics/legacy/pagecounts/aggregate/en.wikipedia/all-sites/monthly/2010010100/2015063023"
        );
    }

    #[test]
    fn test_render_missing_parameter() {
        let err = render_template("https://example.org/{project}/{access}", &Params::new().with("project", "x"))
            .unwrap_err();
        assert!(matches!(err, FetchError::MissingParameter { ref name, .. } if name == "access"));
    }

    #[test]
    fn test_render_invalid_url() {
        let err = render_template("not a url/{a}", &Params::new().with("a", "b")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_every_endpoint_has_distinct_template() {
        let mut seen = std::collections::HashSet::new();
        for endpoint in Endpoint::all() {
            assert!(seen.insert(endpoint.path_template()));
        }
    }
}
