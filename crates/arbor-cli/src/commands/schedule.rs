//! Schedule command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use arbor_config::Validate;
use arbor_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::ScenarioInput;
use crate::output::{print_header, print_output};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub input: ScenarioInput,
}

/// A schedule row.
#[derive(Debug, Serialize, Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Level")]
    level: usize,
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Coupon")]
    coupon: f64,
    #[tabled(rename = "Principal")]
    principal: f64,
    #[tabled(rename = "Total")]
    total: f64,
}

/// Executes the schedule command.
pub fn execute(args: ScheduleArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.input.resolve()?;
    scenario.validate_or_error()?;
    let bond = scenario.bond.to_bond()?;
    let rows = schedule_rows(&bond);

    match format {
        OutputFormat::Table => {
            print_header(&format!("Cash Flows: {}", bond));
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.total);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
    }

    Ok(())
}

fn schedule_rows(bond: &Bond) -> Vec<ScheduleRow> {
    let periods = bond.periods();
    let frequency = bond.frequency_months();

    bond.cash_flows()
        .iter()
        .map(|(level, coupon)| {
            let principal = if level == periods { bond.face_value() } else { 0.0 };
            ScheduleRow {
                level,
                month: u32::try_from(level).map_or(u32::MAX, |l| l.saturating_mul(frequency)),
                coupon,
                principal,
                total: coupon + principal,
            }
        })
        .collect()
}
