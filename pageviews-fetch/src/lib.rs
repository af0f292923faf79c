// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Pageviews Fetch
//!
//! Templated JSON transport for the Wikimedia pageviews REST API.
//!
//! ## Endpoints
//!
//! - [`endpoint::Endpoint`] - The six upstream endpoint families
//! - [`endpoint::EndpointSet`] - Full URL templates under a base URL
//! - [`endpoint::render_template`] - Fills `{name}` slots from [`Params`]
//!
//! ## Transport
//!
//! - [`transport::JsonTransport`] - Trait the client fetches through
//! - [`host::http::HttpClient`] - reqwest implementation
//! - [`response`] - Pulls record lists out of response bodies
//!
//! ## Example
//!
//! ```ignore
//! use pageviews_fetch::{Endpoint, EndpointSet, HttpClient, JsonTransport, Params};
//!
//! let client = HttpClient::new()?;
//! let params = Params::new()
//!     .with("project", "en.wikipedia")
//!     .with("access", "all-access")
//!     .with("year", "2021")
//!     .with("month", "01");
//! let body = client
//!     .fetch_json(&EndpointSet::default().template(Endpoint::TopByCountry), &params, &header)
//!     .await?;
//! ```

pub mod endpoint;
pub mod error;
pub mod host;
pub mod response;
pub mod transport;

pub use endpoint::{DEFAULT_BASE_URL, Endpoint, EndpointSet, Params, render_template};
pub use error::FetchError;
pub use host::{HttpClient, HttpSettings};
pub use response::{first_item_table, items_table};
pub use transport::JsonTransport;
