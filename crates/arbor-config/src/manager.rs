//! Scenario manager.
//!
//! Holds named pricing scenarios in memory, preloaded with the built-in
//! presets.

use std::collections::HashMap;
use std::sync::RwLock;

use arbor_core::prelude::*;

use crate::error::{ConfigError, ConfigResult, Validate};
use crate::scenario::PricingScenario;

/// Registry of named pricing scenarios.
///
/// # Example
///
/// ```rust
/// use arbor_config::ScenarioManager;
///
/// let manager = ScenarioManager::new();
/// let valuation = manager.price("CALLABLE.2Y").unwrap();
/// assert!((valuation.price - 102.1301).abs() < 1e-4);
/// ```
pub struct ScenarioManager {
    cache: RwLock<HashMap<String, PricingScenario>>,
}

impl Default for ScenarioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioManager {
    /// Creates a manager holding the built-in scenarios.
    pub fn new() -> Self {
        let manager = Self::empty();
        manager.load_standard_scenarios();
        manager
    }

    /// Creates a manager with no scenarios.
    pub fn empty() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn load_standard_scenarios(&self) {
        let _ = self.register(PricingScenario::vanilla_2y());
        let _ = self.register(PricingScenario::callable_2y());
    }

    /// Registers a scenario, replacing any writable one of the same name.
    pub fn register(&self, scenario: PricingScenario) -> ConfigResult<()> {
        scenario.validate_or_error()?;

        let mut cache = self
            .cache
            .write()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {}", e)))?;

        if let Some(existing) = cache.get(&scenario.name) {
            if existing.read_only {
                return Err(ConfigError::ReadOnly {
                    key: scenario.name.clone(),
                });
            }
        }

        log::debug!("registered scenario {}", scenario.name);
        cache.insert(scenario.name.clone(), scenario);
        Ok(())
    }

    /// Gets a scenario by name.
    pub fn get(&self, name: &str) -> ConfigResult<PricingScenario> {
        let cache = self
            .cache
            .read()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {}", e)))?;

        cache.get(name).cloned().ok_or_else(|| ConfigError::NotFound {
            key: name.to_string(),
        })
    }

    /// Lists scenario names in sorted order.
    pub fn list(&self) -> ConfigResult<Vec<String>> {
        let cache = self
            .cache
            .read()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {}", e)))?;

        let mut names: Vec<String> = cache.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Deletes a scenario. Returns whether it existed.
    pub fn delete(&self, name: &str) -> ConfigResult<bool> {
        let mut cache = self
            .cache
            .write()
            .map_err(|e| ConfigError::Conflict(format!("Lock error: {}", e)))?;

        if let Some(scenario) = cache.get(name) {
            if scenario.read_only {
                return Err(ConfigError::ReadOnly {
                    key: name.to_string(),
                });
            }
        }

        Ok(cache.remove(name).is_some())
    }

    /// Values a registered scenario.
    pub fn price(&self, name: &str) -> ConfigResult<Valuation> {
        self.get(name)?.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{BondConfig, LatticeConfig, OptionConfig};
    use approx::assert_relative_eq;

    fn custom(name: &str) -> PricingScenario {
        PricingScenario::new(
            name,
            BondConfig::new(0.06, 36)
                .with_face_value(1000.0)
                .with_frequency_months(12)
                .with_option(OptionConfig::call(1010.0)),
            LatticeConfig::new(0.05, 1.2, 0.85),
        )
    }

    #[test]
    fn test_standard_scenarios_loaded() {
        let manager = ScenarioManager::new();
        assert_eq!(
            manager.list().unwrap(),
            vec!["CALLABLE.2Y".to_string(), "VANILLA.2Y".to_string()]
        );
        assert!(ScenarioManager::empty().list().unwrap().is_empty());
    }

    #[test]
    fn test_price_presets() {
        let manager = ScenarioManager::default();
        assert_relative_eq!(
            manager.price("VANILLA.2Y").unwrap().price,
            98.99190433793447,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            manager.price("CALLABLE.2Y").unwrap().price,
            102.13007830704998,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_register_and_price_custom() {
        let manager = ScenarioManager::new();
        manager.register(custom("ANNUAL.3Y")).unwrap();

        let valuation = manager.price("ANNUAL.3Y").unwrap();
        assert_relative_eq!(valuation.price, 960.8185487656058, epsilon = 1e-9);
        assert_eq!(manager.list().unwrap().len(), 3);

        // writable scenarios may be replaced
        let replacement = custom("ANNUAL.3Y").with_description("replaced");
        manager.register(replacement).unwrap();
        assert_eq!(
            manager.get("ANNUAL.3Y").unwrap().description.as_deref(),
            Some("replaced")
        );
    }

    #[test]
    fn test_read_only_protection() {
        let manager = ScenarioManager::new();

        let err = manager.register(custom("VANILLA.2Y")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadOnly { .. }));

        let err = manager.delete("CALLABLE.2Y").unwrap_err();
        assert!(matches!(err, ConfigError::ReadOnly { .. }));
        assert!(manager.get("CALLABLE.2Y").is_ok());
    }

    #[test]
    fn test_delete() {
        let manager = ScenarioManager::new();
        manager.register(custom("TEMP")).unwrap();

        assert!(manager.delete("TEMP").unwrap());
        assert!(!manager.delete("TEMP").unwrap());
        assert!(matches!(
            manager.get("TEMP"),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_scenario_not_registered() {
        let manager = ScenarioManager::new();
        let bad = PricingScenario::new(
            "BAD",
            BondConfig::new(0.05, 25),
            LatticeConfig::new(0.05, 1.1, 0.9),
        );

        assert!(matches!(
            manager.register(bad),
            Err(ConfigError::Validation { .. })
        ));
        assert!(manager.get("BAD").is_err());
    }

    #[test]
    fn test_price_unknown() {
        let manager = ScenarioManager::new();
        assert!(matches!(
            manager.price("NOPE"),
            Err(ConfigError::NotFound { ref key }) if key == "NOPE"
        ));
    }
}
