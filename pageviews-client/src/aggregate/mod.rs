//! Aggregated pageviews across the legacy and current sources.

mod current;
pub mod legacy;

use pageviews_core::{AggregatePageViewRequest, Table, TimeRange, ValidityWindows, ensure_not_before};
use tracing::debug;

use crate::context::RequestContext;
use crate::error::PageViewError;

/// Validates the range, splits it at the cutover and merges both sources.
///
/// Legacy rows come first.
pub(crate) async fn aggregated(
    ctx: RequestContext<'_>,
    windows: &ValidityWindows,
    request: &AggregatePageViewRequest,
) -> Result<Table, PageViewError> {
    let range = TimeRange::parse(&request.start_time, &request.end_time, true)?;
    ensure_not_before(range.start, windows.legacy_start)?;
    let split = windows.split(range)?;
    debug!(legacy = ?split.legacy, current = ?split.current, "Split range");

    let legacy = match split.legacy {
        Some(range) => Some(legacy::fetch(ctx, request.access, request.granularity, range).await?),
        None => None,
    };
    let current = match split.current {
        Some(range) => Some(
            current::fetch_expanded(ctx, request.access, request.agent, request.granularity, range)
                .await?,
        ),
        None => None,
    };

    Ok(Table::concat(legacy.into_iter().chain(current))?)
}
