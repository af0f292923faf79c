//! Article command - pageviews of one article.

use anyhow::Result;
use clap::Args;
use pageviews_core::{AccessMethod, AgentType, Granularity, PerArticlePageViewRequest};

use super::{build_client, print_table};
use crate::Cli;

/// Arguments for the article command.
#[derive(Args)]
pub struct ArticleArgs {
    /// Article title, e.g. "Albert Einstein".
    pub article: String,

    /// Start, YYYYMMDD or YYYYMMDDHH. Not before 20150701.
    pub start: String,

    /// End, YYYYMMDD or YYYYMMDDHH.
    pub end: String,

    /// Access method: all, desktop, mobile-app, mobile-web.
    #[arg(long, default_value = "all")]
    pub access: AccessMethod,

    /// Agent type: all, user, spider, automated.
    #[arg(long, default_value = "all")]
    pub agent: AgentType,

    /// Granularity: daily, monthly.
    #[arg(long, short, default_value = "daily")]
    pub granularity: Granularity,
}

/// Runs the article command.
pub async fn run(args: &ArticleArgs, cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    let request = PerArticlePageViewRequest {
        access: args.access,
        agent: args.agent,
        article: args.article.clone(),
        granularity: args.granularity,
        start_time: args.start.clone(),
        end_time: args.end.clone(),
    };

    let table = client.get_per_article_pageviews(&request).await?;
    print_table(&table, cli)
}
