//! Citr CLI application entry point
//!
//! This is the main executable for the citr registry client. It provides a
//! command-line interface for browsing, searching and editing a roster of
//! citizen records held behind a remote JSON-over-HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Browse the roster interactively (default command)
//! citr
//! citr browse
//! citr browse --state "page=3&rows=25"
//!
//! # Print one page of the roster
//! citr list --page 2 --rows 25
//! citr list --format csv
//!
//! # Advanced search
//! citr search --last-name Ivanov --city Moscow
//!
//! # Record details and edits
//! citr show 1042
//! citr update 1042 --set city=Moscow --set children_count=3
//!
//! # Aggregate statistics
//! citr stats
//!
//! # Quiet mode (only output results)
//! citr -q list
//! ```
//!
//! # Configuration
//!
//! Configuration (API base URL, default page size, timeout) is stored in
//! the user's config directory (`~/.config/citr/config.toml` on Linux) and
//! is created with defaults on first run. The URL can be overridden per
//! invocation with `--api-url`.

use citr::{
    CitrError,
    api::HttpRosterApi,
    cli::{Cli, Commands},
    commands,
    config::CitrConfig,
};
use colored::Colorize;

type Result<T> = std::result::Result<T, CitrError>;

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let mut config = CitrConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    if let Some(url) = &cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    // The config subcommands do not need an API client
    let command = match cli.get_command() {
        Commands::Config { command } => {
            return commands::config_cmd(&mut config, &command);
        }
        command => command,
    };

    let api = HttpRosterApi::new(&config.api_url, config.timeout())?;

    match command {
        Commands::Browse { state } => {
            commands::browse(&api, &config, state.as_deref(), quiet)?;
        }
        Commands::List { page, rows, format } => {
            commands::list(&api, &config, page, rows, format, quiet)?;
        }
        Commands::Search { criteria, format } => {
            commands::search(&api, &config, &criteria, format, quiet)?;
        }
        Commands::Show { id } => {
            commands::show(&api, id)?;
        }
        Commands::Update { id, set } => {
            commands::update(&api, id, &set, quiet)?;
        }
        Commands::Stats => {
            commands::stats(&api)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
