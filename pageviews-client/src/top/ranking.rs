//! Re-ranking of daily per-country rows into one month.

use pageviews_core::{ALL_DAYS, Table, TableError};

/// Columns identifying one article across days.
pub const MONTH_GROUP_KEYS: [&str; 6] = ["country", "access", "year", "month", "article", "project"];

/// Column summed across days.
pub const MONTH_SUM_COLUMN: &str = "views_ceil";

/// Rows kept after ranking.
pub const MONTH_TOP_LIMIT: usize = 1000;

/// Sums daily views per article, keeps the top 1000 and ranks them.
///
/// Groups come out in ascending key order and the sort is stable, so equal
/// totals are ranked by article, then project. The `day` column is set to
/// `all-days`.
pub fn rank_month(daily: Table) -> Result<Table, TableError> {
    if daily.is_empty() {
        return Ok(daily);
    }

    let mut totals = daily.group_by_sum(&MONTH_GROUP_KEYS, MONTH_SUM_COLUMN)?;
    totals.sort_by_desc(MONTH_SUM_COLUMN)?;

    let mut top = totals.head(MONTH_TOP_LIMIT);
    top.assign_rank("rank");
    top.assign("day", ALL_DAYS);
    Ok(top)
}
