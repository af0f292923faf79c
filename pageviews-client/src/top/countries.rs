//! Project pageviews split by country.

use pageviews_core::{RequestDate, Table, TopViewedCountryRequest, ValidityWindows, ensure_not_before};
use pageviews_fetch::{Endpoint, Params, first_item_table};
use tracing::{debug, instrument};

use super::single_access_token;
use crate::context::RequestContext;
use crate::error::PageViewError;

#[instrument(skip(ctx, windows), fields(project = ctx.project))]
pub(crate) async fn top_countries(
    ctx: RequestContext<'_>,
    windows: &ValidityWindows,
    request: &TopViewedCountryRequest,
) -> Result<Table, PageViewError> {
    let access = single_access_token("top viewed countries", request.access)?;
    let date = RequestDate::month(request.year, request.month)?;
    ensure_not_before(date.date().and_time(chrono::NaiveTime::MIN), windows.top_by_country_start)?;

    let (year, month) = (date.year_param(), date.month_param());
    let params = Params::new()
        .with("project", ctx.project)
        .with("access", access)
        .with("year", year.as_str())
        .with("month", month.as_str());

    let body = ctx.fetch(Endpoint::TopByCountry, &params).await?;
    let mut table = first_item_table(&body, "countries")?;
    table.assign("project", ctx.project);
    table.assign("access", access);
    table.assign("year", year);
    table.assign("month", month);
    debug!(rows = table.len(), "Country rows");
    Ok(table)
}
