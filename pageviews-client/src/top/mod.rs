//! Top-list endpoints: articles, countries and articles per country.
//!
//! Each fetcher reads the list nested under `items[0]` and appends the
//! request's path parameters as constant columns.

mod articles;
mod countries;
mod per_country;
pub mod ranking;

pub(crate) use articles::top_articles;
pub(crate) use countries::top_countries;
pub(crate) use per_country::top_per_country;

use pageviews_core::{AccessMethod, InputError, Source};

/// Rejects the combined mobile method and returns the current-source token.
fn single_access_token(
    operation: &'static str,
    access: AccessMethod,
) -> Result<&'static str, InputError> {
    if access.is_mobile_composite() {
        return Err(InputError::UnsupportedAccess { operation, access });
    }
    access.token(Source::Current)
}
