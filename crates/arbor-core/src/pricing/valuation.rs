//! Valuation results.

use serde::Serialize;

use crate::types::{CashFlowSchedule, EmbeddedOption, OptionKind};

/// Result of a single valuation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    /// Fair value at the root.
    pub price: f64,
    /// Number of periods in the tree.
    pub periods: usize,
    /// Number of nodes valued.
    pub node_count: usize,
    /// Embedded option applied, if any.
    pub option: Option<EmbeddedOption>,
    /// Coupon schedule used, one entry per level.
    pub cash_flows: CashFlowSchedule,
    /// Up-move probability.
    pub up_prob: f64,
    /// Down-move probability.
    pub down_prob: f64,
}

/// Price of a bond with and without its embedded option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionDecomposition {
    /// Price of the option-free bond.
    pub straight: f64,
    /// Price of the bond with its option.
    pub with_option: f64,
    /// Kind of option, `None` for a plain bond.
    pub kind: Option<OptionKind>,
}

impl OptionDecomposition {
    /// Value of the embedded option to whoever owns it.
    ///
    /// Callable: `straight - callable` (the issuer's call).
    /// Puttable: `puttable - straight` (the holder's put).
    /// Zero for a plain bond.
    #[must_use]
    pub fn option_value(&self) -> f64 {
        match self.kind {
            Some(OptionKind::Call) => self.straight - self.with_option,
            Some(OptionKind::Put) => self.with_option - self.straight,
            None => 0.0,
        }
    }
}
