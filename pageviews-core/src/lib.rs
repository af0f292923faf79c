// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Pageviews Core
//!
//! Core types and date logic for the pageviews client.
//!
//! This crate does no I/O. It provides:
//!
//! - Category vocabularies and their per-source tokens
//! - Date parsing and validation
//! - Historical validity windows and the legacy/current range splitter
//! - Request records and the result [`Table`]
//! - Error types
//!
//! ## Key Types
//!
//! ### Categories
//! - [`AccessMethod`] - Access method, including the combined mobile method
//! - [`AgentType`] - Agent type filter
//! - [`Granularity`] - Timeseries granularity
//! - [`Source`] - Legacy or current upstream source
//!
//! ### Dates
//! - [`TimeRange`] - Validated start/end pair
//! - [`RequestDate`] - Validated year/month/day for top lists
//! - [`ValidityWindows`] - First available date per endpoint family
//! - [`SplitRange`] - A range split at the cutover
//!
//! ### Requests & Results
//! - [`AggregatePageViewRequest`], [`PerArticlePageViewRequest`],
//!   [`TopViewedArticleRequest`], [`TopViewedCountryRequest`],
//!   [`TopViewedPerCountryRequest`]
//! - [`Table`] - Normalized result rows

pub mod error;
pub mod models;
pub mod time;
pub mod windows;

// Re-export error types
pub use error::{InputError, TableError};

// Re-export all model types
pub use models::{
    // Categories
    AccessMethod,
    AgentType,
    Granularity,
    Source,
    // Requests
    ALL_DAYS,
    AggregatePageViewRequest,
    ApiHeader,
    DaySelector,
    PerArticlePageViewRequest,
    TopViewedArticleRequest,
    TopViewedCountryRequest,
    TopViewedPerCountryRequest,
    // Results
    Row,
    Table,
};

// Re-export date handling
pub use time::{RequestDate, TimeRange, format_request_timestamp, parse_time_parameter};
pub use windows::{SplitRange, ValidityWindows, ensure_not_before};
