// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Pageviews Client
//!
//! Typed client for the Wikimedia pageviews REST API.
//!
//! [`PageViewClient`] exposes five operations, each returning one
//! [`Table`](pageviews_core::Table):
//!
//! | Operation | Endpoint(s) | Notes |
//! |-----------|-------------|-------|
//! | [`get_aggregated_pageviews`](PageViewClient::get_aggregated_pageviews) | legacy + aggregate | range split at 2015-07-01, mobile expanded |
//! | [`get_per_article_pageviews`](PageViewClient::get_per_article_pageviews) | per-article | no hourly, no combined mobile |
//! | [`get_top_pageviews`](PageViewClient::get_top_pageviews) | top | day or whole month |
//! | [`get_top_viewed_country`](PageViewClient::get_top_viewed_country) | top-by-country | month |
//! | [`get_top_view_per_country`](PageViewClient::get_top_view_per_country) | top-per-country | whole month fetched per day |
//!
//! ## Usage
//!
//! ```ignore
//! use pageviews_client::PageViewClient;
//! use pageviews_core::{AccessMethod, ApiHeader, DaySelector, TopViewedPerCountryRequest};
//!
//! let client = PageViewClient::new(
//!     "en.wikipedia",
//!     ApiHeader::new("my-tool/1.0", "me@example.org"),
//! )?;
//! let table = client
//!     .get_top_view_per_country(&TopViewedPerCountryRequest {
//!         country: "FR".into(),
//!         access: AccessMethod::All,
//!         year: 2021,
//!         month: 1,
//!         day: DaySelector::AllDays,
//!     })
//!     .await?;
//! ```

pub mod aggregate;
pub mod article;
pub mod client;
mod context;
pub mod error;
pub mod top;

pub use article::normalize_article;
pub use client::PageViewClient;
pub use error::PageViewError;
pub use top::ranking::{MONTH_GROUP_KEYS, MONTH_TOP_LIMIT, rank_month};
