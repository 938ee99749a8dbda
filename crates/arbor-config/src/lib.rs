//! Arbor Configuration Layer
//!
//! Named pricing scenarios for the Arbor bond lattice. A scenario pairs the
//! bond terms with the lattice parameters so that a full valuation can be
//! described in a TOML or JSON file and replayed.
//!
//! # Example
//!
//! ```rust
//! use arbor_config::{BondConfig, LatticeConfig, OptionConfig, PricingScenario, ScenarioManager};
//!
//! let manager = ScenarioManager::new();
//!
//! // Built-in scenario
//! let vanilla = manager.get("VANILLA.2Y").unwrap();
//! assert_eq!(vanilla.bond.maturity_months, 24);
//!
//! // Register a custom scenario
//! let custom = PricingScenario::new(
//!     "MY.PUTTABLE",
//!     BondConfig::new(0.045, 24).with_option(OptionConfig::put(99.0)),
//!     LatticeConfig::new(0.05, 1.05, 0.95).with_probabilities(0.55, 0.45),
//! );
//! manager.register(custom).unwrap();
//!
//! let valuation = manager.price("MY.PUTTABLE").unwrap();
//! assert!((valuation.price - 99.1687).abs() < 1e-4);
//! ```
//!
//! # Standard Scenarios
//!
//! - `VANILLA.2Y` - 2-year semi-annual 4.5% bond, no option
//! - `CALLABLE.2Y` - 2-year semi-annual 5% bond callable at 104

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod manager;
pub mod scenario;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use manager::ScenarioManager;
pub use scenario::{BondConfig, LatticeConfig, OptionConfig, PricingScenario};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::manager::ScenarioManager;
    pub use crate::scenario::{BondConfig, LatticeConfig, OptionConfig, PricingScenario};
}
