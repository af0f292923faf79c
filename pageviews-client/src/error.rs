//! Client error type.

use pageviews_core::{InputError, TableError};
use pageviews_fetch::FetchError;
use thiserror::Error;

/// Error returned by every [`PageViewClient`](crate::PageViewClient) operation.
#[derive(Debug, Error)]
pub enum PageViewError {
    /// The request was rejected before anything was sent.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A request failed; no partial result is kept.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Responses could not be merged into one table.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl PageViewError {
    /// Returns true for input validation failures.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
