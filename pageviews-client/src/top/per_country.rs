//! Most viewed articles in one country.
//!
//! The endpoint has no whole-month mode. A whole month is fetched one day
//! at a time and re-ranked with [`ranking::rank_month`](super::ranking::rank_month).

use futures::future::try_join_all;
use pageviews_core::{
    RequestDate, Table, TopViewedPerCountryRequest, ValidityWindows, ensure_not_before,
};
use pageviews_fetch::{Endpoint, Params, first_item_table};
use tracing::{debug, info, instrument};

use super::{ranking, single_access_token};
use crate::context::RequestContext;
use crate::error::PageViewError;

#[instrument(skip(ctx, windows))]
pub(crate) async fn top_per_country(
    ctx: RequestContext<'_>,
    windows: &ValidityWindows,
    request: &TopViewedPerCountryRequest,
) -> Result<Table, PageViewError> {
    let access = single_access_token("top viewed per country", request.access)?;
    let date = RequestDate::resolve(request.year, request.month, request.day)?;
    ensure_not_before(date.date().and_time(chrono::NaiveTime::MIN), windows.top_per_country_start)?;

    if !date.is_whole_month() {
        return fetch_day(ctx, &request.country, access, date).await;
    }

    let days = date.days_of_month();
    info!(days = days.len(), "Fetching whole month day by day");
    let daily = try_join_all(
        days.into_iter()
            .map(|day| fetch_day(ctx, &request.country, access, RequestDate::day(day))),
    )
    .await?;

    let month = Table::concat(daily)?;
    debug!(rows = month.len(), "Collected daily rows");
    Ok(ranking::rank_month(month)?)
}

async fn fetch_day(
    ctx: RequestContext<'_>,
    country: &str,
    access: &'static str,
    date: RequestDate,
) -> Result<Table, PageViewError> {
    let (year, month, day) = (date.year_param(), date.month_param(), date.day_param());
    let params = Params::new()
        .with("country", country)
        .with("access", access)
        .with("year", year.as_str())
        .with("month", month.as_str())
        .with("day", day.as_str());

    let body = ctx.fetch(Endpoint::TopPerCountry, &params).await?;
    let mut table = first_item_table(&body, "articles")?;
    table.assign("country", country);
    table.assign("access", access);
    table.assign("year", year);
    table.assign("month", month);
    table.assign("day", day);
    Ok(table)
}
