//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for citr using the `clap`
//! crate: command parsing, argument validation, and the conversions from
//! argument structs into domain types.
//!
//! # Commands
//!
//! - **browse**: interactive roster browser (default)
//! - **list**: print one page of the roster
//! - **search**: advanced search with field criteria
//! - **show**: full detail view of one record
//! - **update**: edit record fields in place
//! - **stats**: aggregate roster statistics
//! - **config**: inspect or change the stored configuration

use crate::filters::{FilterCriteria, SearchField};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for roster listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned table
    #[default]
    Table,
    /// JSON array of records
    Json,
    /// CSV with a header row
    Csv,
}

/// citr - browse and edit a citizen registry from the command line
#[derive(Parser, Debug)]
#[command(name = "citr", version, about)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override the configured API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The selected command, defaulting to interactive browse
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { state: None })
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse the roster interactively (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Resume from a `page=N&rows=M` state token
        #[arg(long, value_name = "TOKEN")]
        state: Option<String>,
    },

    /// Print one page of the roster
    #[command(visible_alias = "ls")]
    List {
        /// Zero-based page to fetch
        #[arg(short, long, default_value_t = 0)]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Search the roster with field criteria
    #[command(visible_alias = "s")]
    Search {
        #[command(flatten)]
        criteria: SearchArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show the full record for one citizen
    Show {
        /// Record id
        id: i64,
    },

    /// Update fields of a record in place
    #[command(visible_alias = "u")]
    Update {
        /// Record id
        id: i64,

        /// Field assignment, repeatable (e.g. --set city=Moscow)
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },

    /// Show aggregate roster statistics
    Stats,

    /// Inspect or change the stored configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the current configuration and its file path
    Show,
    /// Set the API base URL
    SetUrl {
        /// Base URL including any path prefix (e.g. https://host/api)
        url: String,
    },
    /// Set the default page size
    SetRows {
        /// Rows per page (must be positive)
        rows: usize,
    },
}

/// Field criteria for the search command
///
/// One flag per searchable field; omitted and blank flags are simply
/// inactive criteria.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    #[arg(long, value_name = "VALUE")]
    pub first_name: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub last_name: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub middle_name: Option<String>,
    #[arg(long, value_name = "DATE")]
    pub birth_date: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub birth_place: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub gender: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub address: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub city: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub country: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub citizenship: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub education_level: Option<String>,
    #[arg(long, value_name = "VALUE")]
    pub marital_status: Option<String>,
}

impl From<&SearchArgs> for FilterCriteria {
    fn from(args: &SearchArgs) -> Self {
        let mut criteria = Self::new();
        let fields = [
            (SearchField::FirstName, &args.first_name),
            (SearchField::LastName, &args.last_name),
            (SearchField::MiddleName, &args.middle_name),
            (SearchField::BirthDate, &args.birth_date),
            (SearchField::BirthPlace, &args.birth_place),
            (SearchField::Gender, &args.gender),
            (SearchField::Address, &args.address),
            (SearchField::City, &args.city),
            (SearchField::Country, &args.country),
            (SearchField::Citizenship, &args.citizenship),
            (SearchField::EducationLevel, &args.education_level),
            (SearchField::MaritalStatus, &args.marital_status),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                criteria.set(field, value.clone());
            }
        }
        criteria
    }
}
