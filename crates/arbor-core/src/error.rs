//! Error types for lattice construction and bond valuation.
//!
//! Errors fall into two families: configuration errors (invalid or
//! inconsistent inputs, detected before any work is done) and arithmetic
//! errors (a degenerate discount factor or a non-finite node value found
//! during the backward pass). Neither family carries a partial result.

use thiserror::Error;

/// A specialized Result type for Arbor operations.
pub type ArborResult<T> = Result<T, ArborError>;

/// Errors that can occur while building a rate tree or valuing a bond.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArborError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidBond {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field when building a bond.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Invalid rate tree parameters.
    #[error("Invalid rate tree parameters: {reason}")]
    InvalidTree {
        /// Description of what's invalid.
        reason: String,
    },

    /// Invalid risk-neutral probability.
    #[error("Invalid probability {name} = {value}: {reason}")]
    InvalidProbability {
        /// Which probability (`up_prob` or `down_prob`).
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Reason for rejection.
        reason: String,
    },

    /// Requested tree depth exceeds the supported maximum.
    #[error("Rate tree with {requested} periods exceeds the supported maximum of {max}")]
    TooManyPeriods {
        /// Requested number of periods.
        requested: usize,
        /// Largest supported number of periods.
        max: usize,
    },

    /// Tree depth and bond period count disagree.
    #[error("Rate tree has {tree_periods} periods but the bond has {bond_periods}")]
    PeriodMismatch {
        /// Depth of the rate tree.
        tree_periods: usize,
        /// Number of coupon periods of the bond.
        bond_periods: usize,
    },

    /// Discount factor `1 + rate * period_fraction` is zero or not finite.
    #[error("Degenerate discount factor {discount} at level {level} (rate {rate})")]
    DegenerateDiscount {
        /// Tree level of the offending node.
        level: usize,
        /// Short rate of the offending node.
        rate: f64,
        /// The computed discount factor.
        discount: f64,
    },

    /// Backward induction produced a non-finite value.
    #[error("Non-finite bond value {value} at level {level}")]
    NonFiniteValue {
        /// Tree level of the offending node.
        level: usize,
        /// The computed value.
        value: f64,
    },

    /// Pricing failed for an internal reason.
    #[error("Pricing failed: {reason}")]
    PricingFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl ArborError {
    /// Creates an invalid bond error.
    #[must_use]
    pub fn invalid_bond(reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid tree error.
    #[must_use]
    pub fn invalid_tree(reason: impl Into<String>) -> Self {
        Self::InvalidTree {
            reason: reason.into(),
        }
    }

    /// Creates an invalid probability error.
    #[must_use]
    pub fn invalid_probability(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidProbability {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Creates a pricing failed error.
    #[must_use]
    pub fn pricing_failed(reason: impl Into<String>) -> Self {
        Self::PricingFailed {
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by invalid or inconsistent inputs.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidBond { .. }
                | Self::MissingField { .. }
                | Self::InvalidTree { .. }
                | Self::InvalidProbability { .. }
                | Self::TooManyPeriods { .. }
                | Self::PeriodMismatch { .. }
        )
    }

    /// Returns true for errors raised by the arithmetic of the backward pass.
    #[must_use]
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::DegenerateDiscount { .. } | Self::NonFiniteValue { .. }
        )
    }
}
