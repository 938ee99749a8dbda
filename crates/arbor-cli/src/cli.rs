//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{PriceArgs, ScenariosArgs, ScheduleArgs, TreeArgs};

/// Arbor - Binomial short-rate lattice bond valuation
#[derive(Parser)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log debug detail to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter implied by the verbosity flags, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a bond on a binomial rate tree
    Price(PriceArgs),

    /// Print the rate tree level by level
    Tree(TreeArgs),

    /// Print the per-level cash-flow schedule
    Schedule(ScheduleArgs),

    /// List built-in pricing scenarios
    Scenarios(ScenariosArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
