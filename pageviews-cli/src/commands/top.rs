//! Top command - most viewed articles of the project.

use anyhow::Result;
use clap::Args;
use pageviews_core::{AccessMethod, DaySelector, TopViewedArticleRequest};

use super::{build_client, print_table};
use crate::Cli;

/// Arguments for the top command.
#[derive(Args)]
pub struct TopArgs {
    /// Year, e.g. 2021.
    pub year: i32,

    /// Month, 1-12.
    pub month: u32,

    /// Day of month, or all-days for the whole month.
    pub day: DaySelector,

    /// Access method: all, desktop, mobile-app, mobile-web.
    #[arg(long, default_value = "all")]
    pub access: AccessMethod,
}

/// Runs the top command.
pub async fn run(args: &TopArgs, cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    let request = TopViewedArticleRequest {
        access: args.access,
        year: args.year,
        month: args.month,
        day: args.day,
    };

    let table = client.get_top_pageviews(&request).await?;
    print_table(&table, cli)
}
