//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use super::resolve_config;
use crate::output::JsonFormatter;
use crate::settings::CliConfig;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Write a configuration file with the effective values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init { force } => init_config(*force, cli),
    }
}

fn config_path(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(CliConfig::default_path)
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    match cli.format {
        OutputFormat::Text => {
            println!("Pageviews Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Project:    {}", config.project);
            println!("User-Agent: {}", config.user_agent);
            println!("From:       {}", if config.from.is_empty() { "(not set)" } else { config.from.as_str() });
            println!("Timeout:    {}s", config.timeout_secs);
            println!("Base URL:   {}", config.base_url);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Config file: {}", path.display());
            if !path.exists() {
                println!("(not created yet; run `pageviews config init`)");
            }
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": path.display().to_string(),
                "exists": path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = config_path(cli);
    if path.exists() && !force {
        anyhow::bail!("{} already exists; use --force to overwrite", path.display());
    }

    let config = resolve_config(cli)?;
    config.save_to(&path)?;

    info!(path = %path.display(), "Configuration initialized");
    println!("Wrote {}", path.display());
    Ok(())
}
