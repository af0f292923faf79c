//! Historical validity windows and the legacy/current range splitter.
//!
//! Each endpoint family only has data from a fixed date onward. The
//! pageviews start date doubles as the cutover between the legacy
//! pagecounts source and the current pageviews source.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::time::TimeRange;

// ============================================================================
// Validity Windows
// ============================================================================

/// First available date per endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindows {
    /// Legacy pagecounts API; earliest date for aggregated pageviews.
    pub legacy_start: NaiveDate,
    /// Pageviews API; also the legacy/current cutover.
    pub pageviews_start: NaiveDate,
    /// Top-by-country endpoint.
    pub top_by_country_start: NaiveDate,
    /// Top-per-country endpoint.
    pub top_per_country_start: NaiveDate,
}

impl ValidityWindows {
    /// The boundaries observed on the Wikimedia REST API.
    pub const WIKIMEDIA: Self = Self {
        legacy_start: ymd(2007, 12, 1),
        pageviews_start: ymd(2015, 7, 1),
        top_by_country_start: ymd(2015, 5, 1),
        top_per_country_start: ymd(2021, 1, 1),
    };

    /// Instant at which the current source takes over.
    pub fn cutover(&self) -> NaiveDateTime {
        midnight(self.pageviews_start)
    }

    /// Splits `range` at the cutover.
    ///
    /// - Starting at or after the cutover: current only.
    /// - Ending at or before the cutover: legacy only.
    /// - Otherwise: legacy `[start, cutover)` and current `[cutover, end]`.
    pub fn split(&self, range: TimeRange) -> Result<SplitRange, InputError> {
        let cutover = self.cutover();

        if range.start >= cutover {
            return Ok(SplitRange {
                legacy: None,
                current: Some(range),
            });
        }
        if range.end <= cutover {
            return Ok(SplitRange {
                legacy: Some(range),
                current: None,
            });
        }

        Ok(SplitRange {
            legacy: Some(TimeRange::half_open(range.start, cutover)?),
            current: Some(TimeRange::new(cutover, range.end)?),
        })
    }
}

impl Default for ValidityWindows {
    fn default() -> Self {
        Self::WIKIMEDIA
    }
}

/// Fails with [`InputError::BeforeBoundary`] when `ts` predates `boundary`.
pub fn ensure_not_before(ts: NaiveDateTime, boundary: NaiveDate) -> Result<(), InputError> {
    if ts < midnight(boundary) {
        return Err(InputError::BeforeBoundary {
            boundary,
            requested: ts.format("%Y-%m-%d %H:00").to_string(),
        });
    }
    Ok(())
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid validity window date"),
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

// ============================================================================
// Split Range
// ============================================================================

/// A range split between the legacy and current sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRange {
    /// Part served by the legacy source.
    pub legacy: Option<TimeRange>,
    /// Part served by the current source.
    pub current: Option<TimeRange>,
}

impl SplitRange {
    /// Returns true if the range crosses the cutover.
    pub fn is_straddling(&self) -> bool {
        self.legacy.is_some() && self.current.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
