//! Countries command - project pageviews by country.

use anyhow::Result;
use clap::Args;
use pageviews_core::{AccessMethod, TopViewedCountryRequest};

use super::{build_client, print_table};
use crate::Cli;

/// Arguments for the countries command.
#[derive(Args)]
pub struct CountriesArgs {
    /// Year, e.g. 2021.
    pub year: i32,

    /// Month, 1-12.
    pub month: u32,

    /// Access method: all, desktop, mobile-app, mobile-web.
    #[arg(long, default_value = "all")]
    pub access: AccessMethod,
}

/// Runs the countries command.
pub async fn run(args: &CountriesArgs, cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    let request = TopViewedCountryRequest {
        access: args.access,
        year: args.year,
        month: args.month,
    };

    let table = client.get_top_viewed_country(&request).await?;
    print_table(&table, cli)
}
