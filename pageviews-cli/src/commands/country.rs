//! Country command - most viewed articles in one country.

use anyhow::Result;
use clap::Args;
use pageviews_core::{AccessMethod, DaySelector, TopViewedPerCountryRequest};
use tracing::info;

use super::{build_client, print_table};
use crate::Cli;

/// Arguments for the country command.
#[derive(Args)]
pub struct CountryArgs {
    /// ISO 3166-1 alpha-2 country code, e.g. FR.
    pub country: String,

    /// Year, e.g. 2021.
    pub year: i32,

    /// Month, 1-12.
    pub month: u32,

    /// Day of month, or all-days for the whole month (one request per day).
    pub day: DaySelector,

    /// Access method: all, desktop, mobile-app, mobile-web.
    #[arg(long, default_value = "all")]
    pub access: AccessMethod,
}

/// Runs the country command.
pub async fn run(args: &CountryArgs, cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    let request = TopViewedPerCountryRequest {
        country: args.country.to_uppercase(),
        access: args.access,
        year: args.year,
        month: args.month,
        day: args.day,
    };

    if request.day.is_all_days() {
        info!(country = %request.country, "Whole month requested, fetching day by day");
    }
    let table = client.get_top_view_per_country(&request).await?;
    print_table(&table, cli)
}
