//! Pricing scenario types.
//!
//! A scenario bundles a bond description with the lattice it is valued on,
//! so a complete pricing run can be stored in a TOML or JSON file and
//! replayed by name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use arbor_core::prelude::*;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// OPTION CONFIGURATION
// =============================================================================

/// Embedded option flags as they appear in scenario files.
///
/// `strike` is ignored unless `has_option` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Whether the bond carries an option.
    #[serde(default)]
    pub has_option: bool,

    /// Call when true, put otherwise.
    #[serde(default = "default_is_call")]
    pub is_call: bool,

    /// Exercise price.
    #[serde(default)]
    pub strike: f64,
}

fn default_is_call() -> bool {
    true
}

impl Default for OptionConfig {
    fn default() -> Self {
        Self::none()
    }
}

impl OptionConfig {
    /// No embedded option.
    pub fn none() -> Self {
        Self {
            has_option: false,
            is_call: default_is_call(),
            strike: 0.0,
        }
    }

    /// Issuer call at `strike`.
    pub fn call(strike: f64) -> Self {
        Self {
            has_option: true,
            is_call: true,
            strike,
        }
    }

    /// Holder put at `strike`.
    pub fn put(strike: f64) -> Self {
        Self {
            has_option: true,
            is_call: false,
            strike,
        }
    }

    /// Converts to the core option type.
    pub fn to_option(&self) -> ConfigResult<Option<EmbeddedOption>> {
        Ok(EmbeddedOption::from_flags(
            self.has_option,
            self.is_call,
            self.strike,
        )?)
    }
}

// =============================================================================
// BOND CONFIGURATION
// =============================================================================

/// Bond terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondConfig {
    /// Principal repaid at maturity.
    #[serde(default = "default_face_value")]
    pub face_value: f64,

    /// Annual coupon rate as a decimal.
    pub coupon_rate: f64,

    /// Months between coupons.
    #[serde(default = "default_frequency_months")]
    pub frequency_months: u32,

    /// Months to maturity.
    pub maturity_months: u32,

    /// Embedded option flags.
    #[serde(default)]
    pub option: OptionConfig,
}

fn default_face_value() -> f64 {
    100.0
}

fn default_frequency_months() -> u32 {
    6
}

impl BondConfig {
    /// Creates an option-free bond configuration.
    pub fn new(coupon_rate: f64, maturity_months: u32) -> Self {
        Self {
            face_value: default_face_value(),
            coupon_rate,
            frequency_months: default_frequency_months(),
            maturity_months,
            option: OptionConfig::none(),
        }
    }

    /// Sets the face value.
    pub fn with_face_value(mut self, face_value: f64) -> Self {
        self.face_value = face_value;
        self
    }

    /// Sets the coupon frequency in months.
    pub fn with_frequency_months(mut self, months: u32) -> Self {
        self.frequency_months = months;
        self
    }

    /// Sets the option flags.
    pub fn with_option(mut self, option: OptionConfig) -> Self {
        self.option = option;
        self
    }

    /// Builds the core bond.
    pub fn to_bond(&self) -> ConfigResult<Bond> {
        let bond = Bond::new(
            self.face_value,
            self.coupon_rate,
            self.frequency_months,
            self.maturity_months,
        )?;

        Ok(match self.option.to_option()? {
            Some(option) => bond.with_option(option),
            None => bond,
        })
    }
}

impl Validate for BondConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.face_value.is_finite() || self.face_value <= 0.0 {
            errors.push(ValidationError::with_rule(
                "bond.face_value",
                format!("Face value {} must be positive", self.face_value),
                "positive",
            ));
        }

        if !self.coupon_rate.is_finite() || self.coupon_rate < 0.0 {
            errors.push(ValidationError::with_rule(
                "bond.coupon_rate",
                format!("Coupon rate {} must be non-negative", self.coupon_rate),
                "non_negative",
            ));
        }

        if self.frequency_months == 0 {
            errors.push(ValidationError::with_rule(
                "bond.frequency_months",
                "Frequency must be at least one month",
                "positive",
            ));
        } else if self.maturity_months % self.frequency_months != 0 {
            errors.push(ValidationError::with_rule(
                "bond.maturity_months",
                format!(
                    "Maturity {} is not a whole number of {}-month periods",
                    self.maturity_months, self.frequency_months
                ),
                "whole_periods",
            ));
        } else if (self.maturity_months / self.frequency_months) as usize > MAX_PERIODS {
            errors.push(ValidationError::with_rule(
                "bond.maturity_months",
                format!(
                    "{} periods exceeds the maximum of {}",
                    self.maturity_months / self.frequency_months,
                    MAX_PERIODS
                ),
                "max_periods",
            ));
        }

        if self.option.has_option && (!self.option.strike.is_finite() || self.option.strike <= 0.0)
        {
            errors.push(ValidationError::with_rule(
                "bond.option.strike",
                format!("Strike {} must be positive", self.option.strike),
                "positive",
            ));
        }

        errors
    }
}

// =============================================================================
// LATTICE CONFIGURATION
// =============================================================================

/// Short-rate lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Initial short rate.
    pub r0: f64,

    /// Up-move factor.
    pub up: f64,

    /// Down-move factor.
    pub down: f64,

    /// Up-move probability.
    #[serde(default = "default_prob")]
    pub up_prob: f64,

    /// Down-move probability.
    #[serde(default = "default_prob")]
    pub down_prob: f64,
}

fn default_prob() -> f64 {
    0.5
}

impl LatticeConfig {
    /// Creates a lattice with even probabilities.
    pub fn new(r0: f64, up: f64, down: f64) -> Self {
        Self {
            r0,
            up,
            down,
            up_prob: default_prob(),
            down_prob: default_prob(),
        }
    }

    /// Sets the branch probabilities.
    pub fn with_probabilities(mut self, up_prob: f64, down_prob: f64) -> Self {
        self.up_prob = up_prob;
        self.down_prob = down_prob;
        self
    }

    /// Grows a tree with `periods` levels below the root.
    pub fn build_tree(&self, periods: usize) -> ConfigResult<RateTree> {
        let periods = i64::try_from(periods).map_err(|_| {
            ConfigError::Pricing(ArborError::TooManyPeriods {
                requested: periods,
                max: MAX_PERIODS,
            })
        })?;
        Ok(build_tree(self.r0, self.up, self.down, periods)?)
    }

    /// Creates the valuator for these probabilities.
    pub fn valuator(&self) -> ConfigResult<BondValuator> {
        Ok(BondValuator::new(self.up_prob, self.down_prob)?)
    }
}

impl Validate for LatticeConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.r0.is_finite() {
            errors.push(ValidationError::with_rule(
                "lattice.r0",
                "Initial rate must be finite",
                "finite",
            ));
        }

        for (field, factor) in [("lattice.up", self.up), ("lattice.down", self.down)] {
            if !factor.is_finite() || factor <= 0.0 {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Factor {} must be positive", factor),
                    "positive",
                ));
            }
        }

        for (field, prob) in [
            ("lattice.up_prob", self.up_prob),
            ("lattice.down_prob", self.down_prob),
        ] {
            if !prob.is_finite() || prob < 0.0 {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Probability {} must be non-negative", prob),
                    "non_negative",
                ));
            }
        }

        errors
    }
}

// =============================================================================
// PRICING SCENARIO
// =============================================================================

/// A named bond and lattice pair.
///
/// # Example
///
/// ```rust
/// use arbor_config::PricingScenario;
///
/// let scenario = PricingScenario::from_toml_str(r#"
///     name = "MY.BOND"
///
///     [bond]
///     coupon_rate = 0.045
///     maturity_months = 24
///
///     [lattice]
///     r0 = 0.05
///     up = 1.05
///     down = 0.95
///     up_prob = 0.55
///     down_prob = 0.45
/// "#).unwrap();
///
/// let valuation = scenario.value().unwrap();
/// assert!((valuation.price - 98.9919).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingScenario {
    /// Scenario name/identifier.
    pub name: String,

    /// Description of this scenario.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this scenario is read-only (built-in).
    #[serde(default)]
    pub read_only: bool,

    /// Bond terms.
    pub bond: BondConfig,

    /// Lattice parameters.
    pub lattice: LatticeConfig,
}

impl PricingScenario {
    /// Creates a new scenario.
    pub fn new(name: impl Into<String>, bond: BondConfig, lattice: LatticeConfig) -> Self {
        Self {
            name: name.into(),
            description: None,
            read_only: false,
            bond,
            lattice,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 2-year semi-annual 4.5% bond on a 5% lattice.
    pub fn vanilla_2y() -> Self {
        Self {
            name: "VANILLA.2Y".to_string(),
            description: Some("2-year semi-annual 4.5% option-free bond".to_string()),
            read_only: true,
            bond: BondConfig::new(0.045, 24),
            lattice: LatticeConfig::new(0.05, 1.05, 0.95).with_probabilities(0.55, 0.45),
        }
    }

    /// 2-year semi-annual 5% bond callable at 104 on a 3.5% lattice.
    pub fn callable_2y() -> Self {
        Self {
            name: "CALLABLE.2Y".to_string(),
            description: Some("2-year semi-annual 5% bond callable at 104".to_string()),
            read_only: true,
            bond: BondConfig::new(0.05, 24).with_option(OptionConfig::call(104.0)),
            lattice: LatticeConfig::new(0.035, 1.1, 0.95).with_probabilities(0.55, 0.45),
        }
    }

    /// Parses a scenario from TOML.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate_or_error()?;
        Ok(scenario)
    }

    /// Parses a scenario from JSON.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let scenario: Self = serde_json::from_str(content)?;
        scenario.validate_or_error()?;
        Ok(scenario)
    }

    /// Loads a scenario file, choosing the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        log::debug!("loading scenario from {}", path.display());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds the bond, grows a matching tree and values the bond on it.
    ///
    /// Returns the valuation together with the valued tree.
    pub fn run(&self) -> ConfigResult<(Valuation, RateTree)> {
        self.validate_or_error()?;

        let bond = self.bond.to_bond()?;
        let mut tree = self.lattice.build_tree(bond.periods())?;
        let valuation = self.lattice.valuator()?.value(&bond, &mut tree)?;

        Ok((valuation, tree))
    }

    /// Values the scenario.
    pub fn value(&self) -> ConfigResult<Valuation> {
        self.run().map(|(valuation, _)| valuation)
    }
}

impl Validate for PricingScenario {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        errors.extend(self.bond.validate());
        errors.extend(self.lattice.validate());
        errors
    }
}
