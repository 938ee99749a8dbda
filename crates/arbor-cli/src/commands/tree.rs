//! Tree command implementation.
//!
//! Prints the short-rate tree one level per row, optionally with the bond
//! value at every node after backward induction.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use arbor_config::Validate;
use arbor_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::ScenarioInput;
use crate::output::{print_header, print_json_value, print_output};

/// Arguments for the tree command.
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub input: ScenarioInput,

    /// Value the bond and show node values
    #[arg(long)]
    pub values: bool,
}

/// One tree level as printed in tables and CSV.
#[derive(Debug, Serialize, Tabled)]
struct LevelRow {
    #[tabled(rename = "Level")]
    level: usize,
    #[tabled(rename = "Nodes")]
    nodes: usize,
    #[tabled(rename = "Rates")]
    rates: String,
    #[tabled(rename = "Values")]
    values: String,
}

/// One tree level for JSON output.
#[derive(Debug, Serialize)]
struct LevelOutput {
    level: usize,
    rates: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<f64>>,
}

/// Executes the tree command.
pub fn execute(args: TreeArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.input.resolve()?;
    scenario.validate_or_error()?;

    let bond = scenario.bond.to_bond()?;
    let mut tree = scenario.lattice.build_tree(bond.periods())?;

    if args.values {
        scenario.lattice.valuator()?.value(&bond, &mut tree)?;
    }

    let levels = collect_levels(&tree);

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "Rate Tree ({} periods, {} nodes)",
                tree.periods(),
                tree.node_count()
            ));
            print_output(&level_rows(&levels), format)?;
        }
        OutputFormat::Csv => print_output(&level_rows(&levels), format)?,
        OutputFormat::Json => print_json_value(&levels)?,
        OutputFormat::Minimal => {
            for level in &levels {
                match level.values {
                    Some(ref values) => {
                        println!("{} | {}", join_fixed(&level.rates), join_fixed(values));
                    }
                    None => println!("{}", join_fixed(&level.rates)),
                }
            }
        }
    }

    Ok(())
}

fn collect_levels(tree: &RateTree) -> Vec<LevelOutput> {
    tree.levels()
        .enumerate()
        .map(|(level, nodes)| LevelOutput {
            level,
            rates: nodes.iter().map(RateNode::rate).collect(),
            values: tree.values_at(level),
        })
        .collect()
}

fn level_rows(levels: &[LevelOutput]) -> Vec<LevelRow> {
    levels
        .iter()
        .map(|level| LevelRow {
            level: level.level,
            nodes: level.rates.len(),
            rates: join_fixed(&level.rates),
            values: level.values.as_deref().map_or_else(String::new, join_fixed),
        })
        .collect()
}

/// Joins numbers with four decimals.
fn join_fixed(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect::<Vec<_>>()
        .join(" ")
}
