//! Request records for the five pageview operations.
//!
//! Date fields stay as caller-supplied strings or numbers; the client
//! validates them before anything is sent upstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::category::{AccessMethod, AgentType, Granularity};
use crate::error::InputError;

/// Day value that selects a whole month instead of a single day.
pub const ALL_DAYS: &str = "all-days";

// ============================================================================
// API Header
// ============================================================================

/// Identification sent with every upstream request.
///
/// Wikimedia asks API clients to identify themselves with a descriptive
/// `User-Agent` and a contact address in `From`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHeader {
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Value of the `From` header.
    pub call_from: String,
}

impl ApiHeader {
    /// Creates a new header set.
    pub fn new(user_agent: impl Into<String>, call_from: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            call_from: call_from.into(),
        }
    }
}

// ============================================================================
// Day Selector
// ============================================================================

/// Day part of a top-list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DaySelector {
    /// A single day of the month.
    Day(u32),
    /// Every day of the month.
    AllDays,
}

impl DaySelector {
    /// Returns true for the whole-month sentinel.
    pub fn is_all_days(&self) -> bool {
        matches!(self, Self::AllDays)
    }
}

impl From<u32> for DaySelector {
    fn from(day: u32) -> Self {
        Self::Day(day)
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{day}"),
            Self::AllDays => f.write_str(ALL_DAYS),
        }
    }
}

impl FromStr for DaySelector {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == ALL_DAYS {
            return Ok(Self::AllDays);
        }
        trimmed
            .parse::<u32>()
            .map(Self::Day)
            .map_err(|_| InputError::InvalidDay(s.to_string()))
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Aggregated pageviews over a date range, across legacy and current sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePageViewRequest {
    /// Access method filter.
    pub access: AccessMethod,
    /// Agent type filter. The legacy source ignores it.
    pub agent: AgentType,
    /// Timeseries granularity.
    pub granularity: Granularity,
    /// Start, `YYYYMMDD` or `YYYYMMDDHH`. Not earlier than 2007-12-01.
    pub start_time: String,
    /// End, `YYYYMMDD` or `YYYYMMDDHH`.
    pub end_time: String,
}

/// Pageviews of a single article over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerArticlePageViewRequest {
    /// Access method filter. [`AccessMethod::Mobile`] is rejected.
    pub access: AccessMethod,
    /// Agent type filter.
    pub agent: AgentType,
    /// Plain article title; spaces are turned into underscores.
    pub article: String,
    /// Daily or monthly. [`Granularity::Hourly`] is rejected.
    pub granularity: Granularity,
    /// Start, `YYYYMMDD` or `YYYYMMDDHH`.
    pub start_time: String,
    /// End, `YYYYMMDD` or `YYYYMMDDHH`.
    pub end_time: String,
}

/// The 1000 most viewed articles of a day or month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopViewedArticleRequest {
    /// Access method filter. [`AccessMethod::Mobile`] is rejected.
    pub access: AccessMethod,
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month or [`DaySelector::AllDays`].
    pub day: DaySelector,
}

/// Pageviews of a project split by country for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopViewedCountryRequest {
    /// Access method filter. [`AccessMethod::Mobile`] is rejected.
    pub access: AccessMethod,
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

/// The most viewed articles in one country, across all projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopViewedPerCountryRequest {
    /// ISO 3166-1 alpha-2 country code, e.g. `FR`.
    pub country: String,
    /// Access method filter. [`AccessMethod::Mobile`] is rejected.
    pub access: AccessMethod,
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month or [`DaySelector::AllDays`].
    pub day: DaySelector,
}
