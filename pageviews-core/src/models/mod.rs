//! Domain models for the pageviews client.
//!
//! ## Submodules
//!
//! - [`category`] - Access/agent/granularity vocabularies and their tokens
//! - [`request`] - Request records for the five operations
//! - [`table`] - Labeled-column result table

mod category;
mod request;
mod table;

pub use category::{AccessMethod, AgentType, Granularity, Source};
pub use request::{
    ALL_DAYS, AggregatePageViewRequest, ApiHeader, DaySelector, PerArticlePageViewRequest,
    TopViewedArticleRequest, TopViewedCountryRequest, TopViewedPerCountryRequest,
};
pub use table::{Row, Table};
