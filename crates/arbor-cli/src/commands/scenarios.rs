//! Scenarios command implementation.
//!
//! Lists the built-in pricing scenarios, or prints one as TOML so it can be
//! saved, edited and passed back with `--file`.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use arbor_config::{PricingScenario, ScenarioManager};

use crate::cli::OutputFormat;
use crate::output::{print_header, print_info, print_json_value, print_output};

/// Arguments for the scenarios command.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Print this scenario in full as TOML
    #[arg(long)]
    pub show: Option<String>,
}

/// Scenario summary row.
#[derive(Debug, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Periods")]
    periods: u32,
    #[tabled(rename = "Option")]
    option: String,
}

impl From<&PricingScenario> for ScenarioRow {
    fn from(scenario: &PricingScenario) -> Self {
        let bond = &scenario.bond;
        let option = if bond.option.has_option {
            let kind = if bond.option.is_call { "Call" } else { "Put" };
            format!("{} @ {}", kind, bond.option.strike)
        } else {
            "None".to_string()
        };

        Self {
            name: scenario.name.clone(),
            description: scenario.description.clone().unwrap_or_default(),
            periods: bond.maturity_months.checked_div(bond.frequency_months).unwrap_or(0),
            option,
        }
    }
}

/// Executes the scenarios command.
pub fn execute(args: ScenariosArgs, format: OutputFormat) -> Result<()> {
    let manager = ScenarioManager::new();

    if let Some(name) = args.show {
        let scenario = manager.get(&name)?;
        match format {
            OutputFormat::Json => print_json_value(&scenario)?,
            _ => print!("{}", scenario.to_toml_string()?),
        }
        return Ok(());
    }

    let scenarios = manager
        .list()?
        .iter()
        .map(|name| manager.get(name))
        .collect::<Result<Vec<_>, _>>()?;
    let rows: Vec<ScenarioRow> = scenarios.iter().map(ScenarioRow::from).collect();

    match format {
        OutputFormat::Table => {
            print_header("Built-in Scenarios");
            print_output(&rows, format)?;
            print_info("Use `arbor scenarios --show NAME` to print one as TOML.");
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.name);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_from_presets() {
        let vanilla = ScenarioRow::from(&PricingScenario::vanilla_2y());
        assert_eq!(vanilla.periods, 4);
        assert_eq!(vanilla.option, "None");

        let callable = ScenarioRow::from(&PricingScenario::callable_2y());
        assert_eq!(callable.name, "CALLABLE.2Y");
        assert_eq!(callable.option, "Call @ 104");
    }
}
