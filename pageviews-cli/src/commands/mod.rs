//! CLI command implementations.

pub mod aggregate;
pub mod article;
pub mod config;
pub mod countries;
pub mod country;
pub mod top;

use anyhow::Result;
use pageviews_client::PageViewClient;
use pageviews_core::Table;
use tracing::{debug, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::settings::CliConfig;
use crate::{Cli, OutputFormat};

/// Loads the config file and applies command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<CliConfig> {
    let path = cli.config.clone().unwrap_or_else(CliConfig::default_path);
    let config = CliConfig::load_from(&path)?.with_overrides(
        cli.project.as_deref(),
        cli.user_agent.as_deref(),
        cli.from.as_deref(),
    );
    debug!(project = %config.project, base_url = %config.base_url, "Resolved configuration");
    Ok(config)
}

/// Builds a client from the resolved configuration.
pub fn build_client(cli: &Cli) -> Result<PageViewClient> {
    let config = resolve_config(cli)?;
    if config.from.is_empty() {
        warn!("No contact address configured; set one with --from or in the config file");
    }

    let client = PageViewClient::with_settings(
        config.project.clone(),
        config.api_header(),
        &config.http_settings(),
    )?
    .with_endpoints(config.endpoints());
    Ok(client)
}

/// Prints a result table in the selected format.
pub fn print_table(table: &Table, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_table(table, cli.limit));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_table(table, cli.limit)?);
        }
    }
    Ok(())
}
