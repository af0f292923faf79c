//! Aggregate command - project pageviews over a date range.

use anyhow::Result;
use clap::Args;
use pageviews_core::{AccessMethod, AgentType, AggregatePageViewRequest, Granularity};
use tracing::info;

use super::{build_client, print_table};
use crate::Cli;

/// Arguments for the aggregate command.
#[derive(Args)]
pub struct AggregateArgs {
    /// Start, YYYYMMDD or YYYYMMDDHH. Not before 20071201.
    pub start: String,

    /// End, YYYYMMDD or YYYYMMDDHH.
    pub end: String,

    /// Access method: all, desktop, mobile, mobile-app, mobile-web.
    #[arg(long, default_value = "all")]
    pub access: AccessMethod,

    /// Agent type: all, user, spider, automated. Ignored before 2015-07-01.
    #[arg(long, default_value = "all")]
    pub agent: AgentType,

    /// Granularity: hourly, daily, monthly.
    #[arg(long, short, default_value = "daily")]
    pub granularity: Granularity,
}

/// Runs the aggregate command.
pub async fn run(args: &AggregateArgs, cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    let request = AggregatePageViewRequest {
        access: args.access,
        agent: args.agent,
        granularity: args.granularity,
        start_time: args.start.clone(),
        end_time: args.end.clone(),
    };

    info!(project = %client.project(), access = %args.access, "Fetching aggregated pageviews");
    let table = client.get_aggregated_pageviews(&request).await?;
    print_table(&table, cli)
}
