//! CLI command implementations.

pub mod price;
pub mod scenarios;
pub mod schedule;
pub mod tree;

pub use price::PriceArgs;
pub use scenarios::ScenariosArgs;
pub use schedule::ScheduleArgs;
pub use tree::TreeArgs;

use std::path::PathBuf;

use clap::Args;

use arbor_config::{BondConfig, LatticeConfig, OptionConfig, PricingScenario, ScenarioManager};

use crate::error::{CliError, CliResult};

/// Bond and lattice inputs shared by every command that needs a scenario.
///
/// A scenario comes from one of three places: a built-in name, a TOML or
/// JSON file, or the individual flags. `--call` and `--put` apply on top of
/// whichever source is used.
#[derive(Args, Debug, Default)]
pub struct ScenarioInput {
    /// Built-in scenario name (see `arbor scenarios`)
    #[arg(long, conflicts_with = "file")]
    pub scenario: Option<String>,

    /// Scenario file (.toml or .json)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Face value
    #[arg(long, default_value = "100")]
    pub face: f64,

    /// Annual coupon rate as a decimal (0.045 for 4.5%)
    #[arg(short, long)]
    pub coupon: Option<f64>,

    /// Months between coupons
    #[arg(long, default_value = "6")]
    pub frequency: u32,

    /// Months to maturity
    #[arg(short, long)]
    pub maturity: Option<u32>,

    /// Initial short rate as a decimal
    #[arg(long)]
    pub r0: Option<f64>,

    /// Up-move factor applied to the rate
    #[arg(long)]
    pub up: Option<f64>,

    /// Down-move factor applied to the rate
    #[arg(long)]
    pub down: Option<f64>,

    /// Probability of an up move
    #[arg(long, default_value = "0.5")]
    pub up_prob: f64,

    /// Probability of a down move
    #[arg(long, default_value = "0.5")]
    pub down_prob: f64,

    /// Issuer call at this strike
    #[arg(long, conflicts_with = "put")]
    pub call: Option<f64>,

    /// Holder put at this strike
    #[arg(long)]
    pub put: Option<f64>,
}

impl ScenarioInput {
    /// Resolves the inputs into a scenario.
    pub fn resolve(&self) -> CliResult<PricingScenario> {
        let mut scenario = if let Some(ref name) = self.scenario {
            ScenarioManager::new().get(name)?
        } else if let Some(ref path) = self.file {
            PricingScenario::from_file(path)?
        } else {
            self.scenario_from_flags()?
        };

        if let Some(strike) = self.call {
            scenario.bond.option = OptionConfig::call(validate_strike(strike)?);
        } else if let Some(strike) = self.put {
            scenario.bond.option = OptionConfig::put(validate_strike(strike)?);
        }

        tracing::debug!(scenario = %scenario.name, "resolved scenario");
        Ok(scenario)
    }

    fn scenario_from_flags(&self) -> CliResult<PricingScenario> {
        let coupon = required(self.coupon, "--coupon")?;
        let maturity = required(self.maturity, "--maturity")?;
        let r0 = required(self.r0, "--r0")?;
        let up = required(self.up, "--up")?;
        let down = required(self.down, "--down")?;

        let bond = BondConfig::new(validate_coupon(coupon)?, maturity)
            .with_face_value(self.face)
            .with_frequency_months(self.frequency);
        let lattice =
            LatticeConfig::new(r0, up, down).with_probabilities(self.up_prob, self.down_prob);

        Ok(PricingScenario::new("CUSTOM", bond, lattice))
    }
}

fn required<T>(value: Option<T>, flag: &str) -> CliResult<T> {
    value.ok_or_else(|| CliError::MissingArgument(format!("{flag} (or --scenario / --file)")))
}

/// Validates a coupon rate given as a decimal.
pub fn validate_coupon(coupon: f64) -> CliResult<f64> {
    if !(0.0..=1.0).contains(&coupon) {
        return Err(CliError::InvalidArgument {
            name: "coupon rate",
            value: coupon,
            expected: "Give it as a decimal between 0 and 1.",
        });
    }
    Ok(coupon)
}

/// Validates an option strike.
pub fn validate_strike(strike: f64) -> CliResult<f64> {
    if !strike.is_finite() || strike <= 0.0 {
        return Err(CliError::InvalidArgument {
            name: "strike",
            value: strike,
            expected: "Must be positive.",
        });
    }
    Ok(strike)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanilla_flags() -> ScenarioInput {
        ScenarioInput {
            face: 100.0,
            coupon: Some(0.045),
            frequency: 6,
            maturity: Some(24),
            r0: Some(0.05),
            up: Some(1.05),
            down: Some(0.95),
            up_prob: 0.55,
            down_prob: 0.45,
            ..ScenarioInput::default()
        }
    }

    #[test]
    fn test_resolve_from_flags() {
        let scenario = vanilla_flags().resolve().unwrap();
        assert_eq!(scenario.name, "CUSTOM");
        assert_eq!(scenario.bond.maturity_months, 24);
        assert!(!scenario.bond.option.has_option);
        assert_eq!(scenario.lattice.up_prob, 0.55);
    }

    #[test]
    fn test_missing_flag() {
        let input = ScenarioInput {
            r0: None,
            ..vanilla_flags()
        };
        match input.resolve() {
            Err(CliError::MissingArgument(flag)) => assert!(flag.starts_with("--r0")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_option_override_on_builtin() {
        let input = ScenarioInput {
            scenario: Some("VANILLA.2Y".to_string()),
            put: Some(99.0),
            ..ScenarioInput::default()
        };
        let scenario = input.resolve().unwrap();
        assert_eq!(scenario.bond.option, OptionConfig::put(99.0));
    }

    #[test]
    fn test_unknown_scenario() {
        let input = ScenarioInput {
            scenario: Some("NOPE".to_string()),
            ..ScenarioInput::default()
        };
        assert!(matches!(input.resolve(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_validation() {
        assert!(validate_coupon(4.5).is_err());
        assert!(validate_coupon(0.045).is_ok());
        assert!(validate_strike(0.0).is_err());
        assert!(validate_strike(f64::NAN).is_err());
        assert_eq!(validate_strike(104.0).unwrap(), 104.0);
    }
}
