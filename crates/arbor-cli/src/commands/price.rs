//! Price command implementation.
//!
//! Values a bond on a binomial short-rate tree. When the bond carries an
//! embedded option the option-free price and the option value are reported
//! alongside.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use arbor_config::{LatticeConfig, Validate};
use arbor_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::ScenarioInput;
use crate::output::{format_percent, format_price, print_header, print_json_value, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub input: ScenarioInput,
}

/// Full pricing report for JSON output.
#[derive(Debug, Serialize)]
struct PriceReport {
    scenario: String,
    bond: Bond,
    lattice: LatticeConfig,
    price: f64,
    straight_price: Option<f64>,
    option_value: Option<f64>,
    periods: usize,
    node_count: usize,
}

/// Executes the price command.
pub fn execute(args: PriceArgs, format: OutputFormat) -> Result<()> {
    let scenario = args.input.resolve()?;
    scenario.validate_or_error()?;

    let bond = scenario.bond.to_bond()?;
    let mut tree = scenario.lattice.build_tree(bond.periods())?;
    let valuator = scenario.lattice.valuator()?;

    let (valuation, decomposition) = value_and_decompose(&valuator, &bond, &mut tree)?;

    tracing::info!(price = valuation.price, nodes = valuation.node_count, "priced {}", bond);

    let report = PriceReport {
        scenario: scenario.name.clone(),
        bond: bond.clone(),
        lattice: scenario.lattice,
        price: valuation.price,
        straight_price: decomposition.map(|d| d.straight),
        option_value: decomposition.map(|d| d.option_value()),
        periods: valuation.periods,
        node_count: valuation.node_count,
    };

    match format {
        OutputFormat::Table => {
            print_header("Bond Pricing Results");
            crate::output::print_output(&report_rows(&report), format)?;
        }
        OutputFormat::Csv => {
            crate::output::print_output(&report_rows(&report), format)?;
        }
        OutputFormat::Json => print_json_value(&report)?,
        OutputFormat::Minimal => println!("{:.6}", report.price),
    }

    Ok(())
}

/// Values the bond, plus its option-free twin when it carries an option.
///
/// The optioned pass runs last so the tree is left holding its values.
fn value_and_decompose(
    valuator: &BondValuator,
    bond: &Bond,
    tree: &mut RateTree,
) -> ArborResult<(Valuation, Option<OptionDecomposition>)> {
    let straight = if bond.has_option() {
        Some(valuator.price(&bond.without_option(), tree)?)
    } else {
        None
    };
    let valuation = valuator.value(bond, tree)?;

    let decomposition = straight.map(|straight| OptionDecomposition {
        straight,
        with_option: valuation.price,
        kind: bond.option().map(|option| option.kind()),
    });
    Ok((valuation, decomposition))
}

fn report_rows(report: &PriceReport) -> Vec<KeyValue> {
    let bond = &report.bond;
    let lattice = &report.lattice;

    let mut rows = vec![
        KeyValue::new("Scenario", report.scenario.as_str()),
        KeyValue::from_f64("Face Value", bond.face_value(), 2),
        KeyValue::new("Coupon Rate", format_percent(bond.coupon_rate())),
        KeyValue::new("Frequency", format!("{} months", bond.frequency_months())),
        KeyValue::new("Maturity", format!("{} months", bond.maturity_months())),
        KeyValue::new("Periods", report.periods.to_string()),
        KeyValue::new(
            "Option",
            bond.option()
                .map_or_else(|| "None".to_string(), ToString::to_string),
        ),
        KeyValue::new("Initial Rate", format_percent(lattice.r0)),
        KeyValue::new("Up / Down", format!("{} / {}", lattice.up, lattice.down)),
        KeyValue::new(
            "Probabilities",
            format!("{} / {}", lattice.up_prob, lattice.down_prob),
        ),
        KeyValue::new("Nodes", report.node_count.to_string()),
        KeyValue::new("Price", format_price(report.price)),
    ];

    if let (Some(straight), Some(option_value)) = (report.straight_price, report.option_value) {
        rows.push(KeyValue::new("Straight Price", format_price(straight)));
        rows.push(KeyValue::from_f64("Option Value", option_value, 4));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(option: Option<EmbeddedOption>) -> PriceReport {
        let mut bond = Bond::new(100.0, 0.05, 6, 24).unwrap();
        if let Some(option) = option {
            bond = bond.with_option(option);
        }
        PriceReport {
            scenario: "TEST".to_string(),
            bond,
            lattice: LatticeConfig::new(0.035, 1.1, 0.95).with_probabilities(0.55, 0.45),
            price: 102.13007830704998,
            straight_price: option.map(|_| 102.54261853104225),
            option_value: option.map(|_| 0.41254022399227),
            periods: 4,
            node_count: 31,
        }
    }

    #[test]
    fn test_rows_plain() {
        let rows = report_rows(&report(None));
        let price = rows.iter().find(|r| r.key == "Price").unwrap();
        assert_eq!(price.value, "$102.13");
        assert!(rows.iter().all(|r| r.key != "Straight Price"));
        assert_eq!(rows.iter().find(|r| r.key == "Option").unwrap().value, "None");
    }

    #[test]
    fn test_rows_with_option() {
        let rows = report_rows(&report(Some(EmbeddedOption::call(104.0).unwrap())));
        assert_eq!(
            rows.iter().find(|r| r.key == "Straight Price").unwrap().value,
            "$102.54"
        );
        assert_eq!(
            rows.iter().find(|r| r.key == "Option Value").unwrap().value,
            "0.4125"
        );
        assert_eq!(
            rows.iter().find(|r| r.key == "Option").unwrap().value,
            "Call @ 104"
        );
    }

    #[test]
    fn test_value_and_decompose_callable() {
        let lattice = LatticeConfig::new(0.035, 1.1, 0.95).with_probabilities(0.55, 0.45);
        let valuator = lattice.valuator().unwrap();
        let bond =
            Bond::new(100.0, 0.05, 6, 24).unwrap().with_option(EmbeddedOption::call(104.0).unwrap());
        let mut tree = lattice.build_tree(4).unwrap();

        let (valuation, decomposition) = value_and_decompose(&valuator, &bond, &mut tree).unwrap();
        let decomposition = decomposition.unwrap();

        let mut fresh = lattice.build_tree(4).unwrap();
        let expected = valuator.decompose(&bond, &mut fresh).unwrap();
        assert_eq!(decomposition, expected);
        assert_eq!(valuation.price, decomposition.with_option);
        assert!((valuation.price - 102.13007830704998).abs() < 1e-9);
        assert_eq!(tree.values_at(0), Some(vec![valuation.price]));
    }

    #[test]
    fn test_value_and_decompose_plain() {
        let lattice = LatticeConfig::new(0.05, 1.05, 0.95).with_probabilities(0.55, 0.45);
        let valuator = lattice.valuator().unwrap();
        let bond = Bond::new(100.0, 0.045, 6, 24).unwrap();
        let mut tree = lattice.build_tree(4).unwrap();

        let (valuation, decomposition) = value_and_decompose(&valuator, &bond, &mut tree).unwrap();
        assert!(decomposition.is_none());
        assert!((valuation.price - 98.991904).abs() < 1e-6);
    }
}
