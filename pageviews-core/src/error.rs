//! Core error types for the pageviews client.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{AccessMethod, Granularity};

// ============================================================================
// Input Error
// ============================================================================

/// Input validation error.
///
/// Every variant is detected before any request is sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A date string does not match `YYYYMMDD` (or `YYYYMMDDHH` when hours are allowed).
    #[error("{0} is invalid datetime string")]
    InvalidTimestamp(String),

    /// The start of a range is later than its end.
    #[error("start time {start} should not be later than end time {end}")]
    StartAfterEnd {
        /// Rendered start timestamp.
        start: String,
        /// Rendered end timestamp.
        end: String,
    },

    /// The requested date predates the first day the endpoint has data for.
    #[error("Data before {boundary} is not available (requested {requested})")]
    BeforeBoundary {
        /// First available date.
        boundary: NaiveDate,
        /// Rendered requested date.
        requested: String,
    },

    /// The access method has no token for the targeted source.
    #[error("{operation} doesn't support {access} access")]
    UnsupportedAccess {
        /// Operation or source that rejected the access method.
        operation: &'static str,
        /// Rejected access method.
        access: AccessMethod,
    },

    /// The granularity is not offered by the targeted endpoint.
    #[error("{operation} doesn't support {granularity} granularity")]
    UnsupportedGranularity {
        /// Operation that rejected the granularity.
        operation: &'static str,
        /// Rejected granularity.
        granularity: Granularity,
    },

    /// Year is zero or negative.
    #[error("Year value {0} should not be smaller than or equal to 0")]
    InvalidYear(i32),

    /// Month is outside 1..=12.
    #[error("Month value {0} should be between 1 and 12")]
    InvalidMonth(u32),

    /// Day is neither a number nor the whole-month sentinel.
    #[error("Day value {0} only accepts 1-31 or all-days")]
    InvalidDay(String),

    /// Year/month/day do not form a calendar date.
    #[error("Invalid date provided: {year}-{month}-{day}")]
    InvalidDate {
        /// Year.
        year: i32,
        /// Month.
        month: u32,
        /// Day.
        day: u32,
    },
}

// ============================================================================
// Table Error
// ============================================================================

/// Error raised by [`Table`](crate::Table) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two non-empty tables with different column sets were concatenated.
    #[error("Schema mismatch: [{}] vs [{}]", left.join(", "), right.join(", "))]
    SchemaMismatch {
        /// Columns of the accumulated table.
        left: Vec<String>,
        /// Columns of the table being appended.
        right: Vec<String>,
    },

    /// A referenced column does not exist.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column expected to hold numbers holds something else.
    #[error("Column {column} holds a non-numeric value: {value}")]
    NonNumeric {
        /// Column name.
        column: String,
        /// Offending value, rendered as JSON.
        value: String,
    },
}
