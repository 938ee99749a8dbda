//! Arbor CLI - binomial short-rate lattice bond valuation.
//!
//! # Usage
//!
//! ```bash
//! # Price a 2-year semi-annual 4.5% bond
//! arbor price --coupon 0.045 --maturity 24 --r0 0.05 --up 1.05 --down 0.95 \
//!     --up-prob 0.55 --down-prob 0.45
//!
//! # Same bond, callable at 101
//! arbor price --scenario VANILLA.2Y --call 101
//!
//! # Show the rate tree with node values
//! arbor tree --scenario CALLABLE.2Y --values
//!
//! # Price a scenario file
//! arbor price --file my_bond.toml --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, format)?,
        Commands::Tree(args) => commands::tree::execute(args, format)?,
        Commands::Schedule(args) => commands::schedule::execute(args, format)?,
        Commands::Scenarios(args) => commands::scenarios::execute(args, format)?,
    }

    Ok(())
}
