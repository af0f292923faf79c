//! Date parsing and validation.
//!
//! - [`parse_time_parameter`] / [`TimeRange::parse`] turn `YYYYMMDD[HH]` strings
//!   into naive timestamps.
//! - [`RequestDate`] validates a year/month/day triple for top-list requests
//!   and renders the zero-padded path segments.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::InputError;
use crate::models::{ALL_DAYS, DaySelector};

/// Format of timestamps in upstream request paths.
pub const REQUEST_TIMESTAMP_FORMAT: &str = "%Y%m%d%H";

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})(\d{2})(\d{2})(\d{2})?$").unwrap_or_else(|e| {
            panic!("timestamp pattern failed to compile: {e}")
        })
    })
}

/// Parses `YYYYMMDD`, or `YYYYMMDDHH` when `support_hour` is set.
pub fn parse_time_parameter(value: &str, support_hour: bool) -> Result<NaiveDateTime, InputError> {
    let invalid = || InputError::InvalidTimestamp(value.to_string());

    let caps = timestamp_pattern().captures(value).ok_or_else(invalid)?;
    let number = |i: usize| -> Result<u32, InputError> {
        caps.get(i)
            .map_or(Ok(0), |m| m.as_str().parse::<u32>().map_err(|_| invalid()))
    };

    let has_hour = caps.get(4).is_some();
    if has_hour && !support_hour {
        return Err(invalid());
    }

    let year = i32::try_from(number(1)?).map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(number(4)?, 0, 0).ok_or_else(invalid)?;
    Ok(NaiveDateTime::new(date, time))
}

/// Renders a timestamp the way request paths expect it (`YYYYMMDDHH`).
pub fn format_request_timestamp(ts: NaiveDateTime) -> String {
    ts.format(REQUEST_TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// Time Range
// ============================================================================

/// Ordered pair of timestamps.
///
/// The end is inclusive unless the range was cut at the legacy/current
/// cutover, in which case it is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// First instant of the range.
    pub start: NaiveDateTime,
    /// Last instant of the range.
    pub end: NaiveDateTime,
    /// Whether `end` itself is excluded.
    pub end_exclusive: bool,
}

impl TimeRange {
    /// Creates an inclusive range. Fails when `start > end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InputError> {
        if start > end {
            return Err(InputError::StartAfterEnd {
                start: format_request_timestamp(start),
                end: format_request_timestamp(end),
            });
        }
        Ok(Self {
            start,
            end,
            end_exclusive: false,
        })
    }

    /// Creates the half-open range `[start, end)`.
    pub fn half_open(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InputError> {
        let mut range = Self::new(start, end)?;
        range.end_exclusive = true;
        Ok(range)
    }

    /// Parses and validates a start/end pair.
    ///
    /// Both strings must have a valid format before ordering is checked.
    pub fn parse(start: &str, end: &str, support_hour: bool) -> Result<Self, InputError> {
        let start = parse_time_parameter(start, support_hour)?;
        let end = parse_time_parameter(end, support_hour)?;
        Self::new(start, end)
    }

    /// Returns true if `ts` lies within the range.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        if self.end_exclusive {
            self.start <= ts && ts < self.end
        } else {
            self.start <= ts && ts <= self.end
        }
    }

    /// Start rendered for a request path.
    pub fn start_param(&self) -> String {
        format_request_timestamp(self.start)
    }

    /// End rendered for a request path.
    ///
    /// An exclusive end is sent as the last whole hour before it, since
    /// upstream ends are inclusive.
    pub fn end_param(&self) -> String {
        if self.end_exclusive && self.end > self.start {
            format_request_timestamp(self.end - chrono::Duration::hours(1))
        } else {
            format_request_timestamp(self.end)
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.end_exclusive { ')' } else { ']' };
        write!(
            f,
            "[{}, {}{}",
            format_request_timestamp(self.start),
            format_request_timestamp(self.end),
            close
        )
    }
}

// ============================================================================
// Request Date
// ============================================================================

/// Validated year/month/day for top-list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestDate {
    date: NaiveDate,
    whole_month: bool,
}

impl RequestDate {
    /// Validates a year/month/day triple.
    ///
    /// For [`DaySelector::AllDays`] the date is the first of the month.
    pub fn resolve(year: i32, month: u32, day: DaySelector) -> Result<Self, InputError> {
        validate_year_month(year, month)?;
        match day {
            DaySelector::Day(d) => {
                let date = NaiveDate::from_ymd_opt(year, month, d).ok_or(InputError::InvalidDate {
                    year,
                    month,
                    day: d,
                })?;
                Ok(Self {
                    date,
                    whole_month: false,
                })
            }
            DaySelector::AllDays => Self::month(year, month),
        }
    }

    /// Validates a year/month pair and selects the whole month.
    pub fn month(year: i32, month: u32) -> Result<Self, InputError> {
        validate_year_month(year, month)?;
        let date = NaiveDate::from_ymd_opt(year, month, 1).ok_or(InputError::InvalidDate {
            year,
            month,
            day: 1,
        })?;
        Ok(Self {
            date,
            whole_month: true,
        })
    }

    /// A single day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            date,
            whole_month: false,
        }
    }

    /// The selected day, or the first of the month for a whole month.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns true when the whole month is selected.
    pub fn is_whole_month(&self) -> bool {
        self.whole_month
    }

    /// Zero-padded year, e.g. `2021`.
    pub fn year_param(&self) -> String {
        self.date.format("%Y").to_string()
    }

    /// Zero-padded month, e.g. `01`.
    pub fn month_param(&self) -> String {
        self.date.format("%m").to_string()
    }

    /// Zero-padded day, or `all-days` for a whole month.
    pub fn day_param(&self) -> String {
        if self.whole_month {
            ALL_DAYS.to_string()
        } else {
            self.date.format("%d").to_string()
        }
    }

    /// Every calendar day of the selected month, in order.
    pub fn days_of_month(&self) -> Vec<NaiveDate> {
        let first = self.date.with_day(1).unwrap_or(self.date);
        first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .collect()
    }
}

fn validate_year_month(year: i32, month: u32) -> Result<(), InputError> {
    if year <= 0 {
        return Err(InputError::InvalidYear(year));
    }
    if !(1..=12).contains(&month) {
        return Err(InputError::InvalidMonth(month));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
