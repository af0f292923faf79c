//! Current pageviews source.

use pageviews_core::{AccessMethod, AgentType, Granularity, Source, Table, TimeRange};
use pageviews_fetch::{Endpoint, Params, items_table};
use tracing::{debug, instrument};

use crate::context::RequestContext;
use crate::error::PageViewError;

/// Fetches one access method from the current source.
///
/// Fails on [`AccessMethod::Mobile`]; use [`fetch_expanded`] for it.
#[instrument(skip(ctx, range), fields(project = ctx.project, range = %range))]
pub(crate) async fn fetch(
    ctx: RequestContext<'_>,
    access: AccessMethod,
    agent: AgentType,
    granularity: Granularity,
    range: TimeRange,
) -> Result<Table, PageViewError> {
    let params = Params::new()
        .with("project", ctx.project)
        .with("access", access.token(Source::Current)?)
        .with("agent", agent.token())
        .with("granularity", granularity.token())
        .with("start", range.start_param())
        .with("end", range.end_param());

    let body = ctx.fetch(Endpoint::Aggregate, &params).await?;
    let table = items_table(&body)?;
    debug!(rows = table.len(), "Current rows");
    Ok(table)
}

/// Fetches from the current source, expanding the combined mobile method.
///
/// Mobile is requested as app then web and the rows are concatenated in
/// that order.
pub(crate) async fn fetch_expanded(
    ctx: RequestContext<'_>,
    access: AccessMethod,
    agent: AgentType,
    granularity: Granularity,
    range: TimeRange,
) -> Result<Table, PageViewError> {
    if !access.is_mobile_composite() {
        return fetch(ctx, access, agent, granularity, range).await;
    }

    let parts = futures::future::try_join_all(
        AccessMethod::MOBILE_PARTS
            .iter()
            .map(|part| fetch(ctx, *part, agent, granularity, range)),
    )
    .await?;
    Ok(Table::concat(parts)?)
}
