//! Most viewed articles of a project.

use pageviews_core::{RequestDate, Table, TopViewedArticleRequest, ValidityWindows, ensure_not_before};
use pageviews_fetch::{Endpoint, Params, first_item_table};
use tracing::{debug, instrument};

use super::single_access_token;
use crate::context::RequestContext;
use crate::error::PageViewError;

#[instrument(skip(ctx, windows), fields(project = ctx.project))]
pub(crate) async fn top_articles(
    ctx: RequestContext<'_>,
    windows: &ValidityWindows,
    request: &TopViewedArticleRequest,
) -> Result<Table, PageViewError> {
    let access = single_access_token("top viewed articles", request.access)?;
    let date = RequestDate::resolve(request.year, request.month, request.day)?;
    ensure_not_before(date.date().and_time(chrono::NaiveTime::MIN), windows.pageviews_start)?;

    let (year, month, day) = (date.year_param(), date.month_param(), date.day_param());
    let params = Params::new()
        .with("project", ctx.project)
        .with("access", access)
        .with("year", year.as_str())
        .with("month", month.as_str())
        .with("day", day.as_str());

    let body = ctx.fetch(Endpoint::Top, &params).await?;
    let mut table = first_item_table(&body, "articles")?;
    table.assign("project", ctx.project);
    table.assign("access", access);
    table.assign("year", year);
    table.assign("month", month);
    table.assign("day", day);
    debug!(rows = table.len(), "Top article rows");
    Ok(table)
}
