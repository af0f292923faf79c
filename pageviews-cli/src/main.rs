// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Pageviews CLI - Wikimedia pageview statistics from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Monthly views of English Wikipedia, spanning the 2015 cutover
//! pageviews aggregate --granularity monthly 20140101 20160101
//!
//! # Daily views of one article
//! pageviews article "Albert Einstein" 20200101 20200131
//!
//! # Top articles of a month
//! pageviews --project fr.wikipedia top 2021 1 all-days
//!
//! # Top articles in France for a whole month, as JSON
//! pageviews --format json country FR 2021 1 all-days --limit 20
//! ```

mod commands;
mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pageviews_client::PageViewError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{aggregate, article, config, countries, country, top};

// ============================================================================
// CLI Definition
// ============================================================================

/// Pageviews CLI - Wikimedia pageview statistics.
#[derive(Parser)]
#[command(name = "pageviews")]
#[command(about = "Wikimedia pageviews API client")]
#[command(long_about = r#"
Queries the Wikimedia pageviews REST API.

Aggregated ranges before 2015-07-01 are served by the legacy pagecounts
API and merged with current data. Combined mobile access is fetched as
app plus web.

Examples:
  pageviews aggregate 20140101 20160101 --granularity monthly
  pageviews article "Albert Einstein" 20200101 20200131
  pageviews top 2021 1 all-days
  pageviews countries 2021 1
  pageviews country FR 2021 1 all-days
"#)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Project to query, e.g. en.wikipedia.
    #[arg(long, short, global = true)]
    pub project: Option<String>,

    /// User-Agent header sent upstream.
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Contact address sent in the From header.
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Configuration file to use instead of the default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print only the first N rows.
    #[arg(long, short = 'n', global = true)]
    pub limit: Option<usize>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregated pageviews of the project over a date range.
    #[command(visible_alias = "a")]
    Aggregate(aggregate::AggregateArgs),

    /// Pageviews of one article over a date range.
    Article(article::ArticleArgs),

    /// Most viewed articles of a day or month.
    #[command(visible_alias = "t")]
    Top(top::TopArgs),

    /// Pageviews of the project split by country for a month.
    Countries(countries::CountriesArgs),

    /// Most viewed articles in one country for a day or month.
    Country(country::CountryArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Text,
    /// JSON array of rows.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// The request was rejected before anything was sent.
    InvalidInput = 2,
}

impl ExitCode {
    fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<PageViewError>() {
            Some(e) if e.is_input() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pageviews=debug,info")
        } else {
            EnvFilter::new("pageviews=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Aggregate(args) => aggregate::run(args, &cli).await,
        Commands::Article(args) => article::run(args, &cli).await,
        Commands::Top(args) => top::run(args, &cli).await,
        Commands::Countries(args) => countries::run(args, &cli).await,
        Commands::Country(args) => country::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
