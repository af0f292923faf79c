//! Network host implementations of [`JsonTransport`](crate::JsonTransport).
//!
//! - [`http`] - reqwest client sending identification headers

pub mod http;

pub use http::{HttpClient, HttpSettings};
