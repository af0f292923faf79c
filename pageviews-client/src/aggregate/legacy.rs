//! Legacy pagecounts source and its alignment to the current schema.
//!
//! Legacy rows carry `access-site` and `count` columns, use `-site` access
//! tokens, and have no agent dimension.

use pageviews_core::{AccessMethod, AgentType, Granularity, Table, TableError, TimeRange};
use pageviews_fetch::{Endpoint, Params, items_table};
use tracing::{debug, instrument};

use crate::context::RequestContext;
use crate::error::PageViewError;

/// Legacy to current column names.
pub const COLUMN_RENAMES: [(&str, &str); 2] = [("access-site", "access"), ("count", "views")];

/// Legacy to current access tokens.
pub const ACCESS_REPLACEMENTS: [(&str, &str); 2] =
    [("all-sites", "all-access"), ("desktop-site", "desktop")];

/// Fetches legacy pagecounts and aligns them to the current schema.
#[instrument(skip(ctx, range), fields(project = ctx.project, range = %range))]
pub(crate) async fn fetch(
    ctx: RequestContext<'_>,
    access: AccessMethod,
    granularity: Granularity,
    range: TimeRange,
) -> Result<Table, PageViewError> {
    let params = Params::new()
        .with("project", ctx.project)
        .with("access-site", access.legacy_token())
        .with("granularity", granularity.token())
        .with("start", range.start_param())
        .with("end", range.end_param());

    let body = ctx.fetch(Endpoint::AggregateLegacy, &params).await?;
    let table = align(items_table(&body)?)?;
    debug!(rows = table.len(), "Legacy rows");
    Ok(table)
}

/// Renames legacy columns, maps access tokens and adds the agent column.
pub fn align(mut table: Table) -> Result<Table, TableError> {
    for (from, to) in COLUMN_RENAMES {
        table.rename_column(from, to)?;
    }
    table.replace_values("access", &ACCESS_REPLACEMENTS)?;
    table.assign("agent", AgentType::All.token());
    Ok(table)
}
