use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use price_table::pricing::{SortDirection, SortField, SortState};

#[derive(Parser, Debug)]
#[command(name = "price-table", version, about = "Zone cost estimation dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "price-table.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Data source and parameter overrides shared by dashboard and snapshot
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Zone endpoint URL (overrides source.url)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Number of requests
    #[arg(long, allow_hyphen_values = true)]
    pub num_requests: Option<String>,

    /// Response size in GB
    #[arg(long, allow_hyphen_values = true)]
    pub response_size: Option<String>,

    /// Billing frequency in days per month
    #[arg(long, allow_hyphen_values = true)]
    pub frequency: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the live cost estimation dashboard (default)
    Dashboard {
        #[command(flatten)]
        source: SourceArgs,

        /// Refresh interval in milliseconds (overrides refresh.interval_ms)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Keep the active sort across refreshes
        #[arg(long)]
        sticky_sort: bool,
    },

    /// Fetch once and print the cost table
    Snapshot {
        #[command(flatten)]
        source: SourceArgs,

        /// Order rows by a derived total
        #[arg(short, long, value_enum)]
        sort: Option<SnapshotSort>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSort {
    TotalAsc,
    TotalDesc,
    MonthlyAsc,
    MonthlyDesc,
}

impl From<SnapshotSort> for SortState {
    fn from(sort: SnapshotSort) -> Self {
        match sort {
            SnapshotSort::TotalAsc => SortState::by(SortField::TotalCost, SortDirection::Ascending),
            SnapshotSort::TotalDesc => SortState::by(SortField::TotalCost, SortDirection::Descending),
            SnapshotSort::MonthlyAsc => {
                SortState::by(SortField::MonthlyTotal, SortDirection::Ascending)
            }
            SnapshotSort::MonthlyDesc => {
                SortState::by(SortField::MonthlyTotal, SortDirection::Descending)
            }
        }
    }
}

impl Cli {
    /// Get the command to execute, defaulting to the dashboard if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dashboard {
            source: SourceArgs::default(),
            interval_ms: None,
            sticky_sort: false,
        })
    }
}
