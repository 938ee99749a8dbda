//! Embedded option terms for callable and puttable bonds.
//!
//! A bond carries at most one embedded option. The option is exercisable at
//! every node of the lattice at a single strike: a call caps the holder's
//! value at the strike, a put floors it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ArborError, ArborResult};

/// Type of embedded option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Issuer may redeem at the strike: node values are capped.
    Call,
    /// Holder may redeem at the strike: node values are floored.
    Put,
}

impl OptionKind {
    /// Returns true if this is a call provision.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Returns true if this is a put provision.
    #[must_use]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionKind::Put)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::Call => "Call",
            OptionKind::Put => "Put",
        };
        write!(f, "{name}")
    }
}

/// An embedded call or put at a single strike.
///
/// # Example
///
/// ```
/// use arbor_core::types::{EmbeddedOption, OptionKind};
///
/// let call = EmbeddedOption::call(104.0).unwrap();
/// assert_eq!(call.kind(), OptionKind::Call);
/// assert_eq!(call.exercise(106.0), 104.0);
/// assert_eq!(call.exercise(101.0), 101.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedOption {
    kind: OptionKind,
    strike: f64,
}

impl EmbeddedOption {
    /// Creates a new embedded option.
    ///
    /// The strike must be finite and strictly positive.
    pub fn new(kind: OptionKind, strike: f64) -> ArborResult<Self> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(ArborError::invalid_bond(format!(
                "{kind} strike must be a positive finite amount, got {strike}"
            )));
        }
        Ok(Self { kind, strike })
    }

    /// Creates a call at the given strike.
    pub fn call(strike: f64) -> ArborResult<Self> {
        Self::new(OptionKind::Call, strike)
    }

    /// Creates a put at the given strike.
    pub fn put(strike: f64) -> ArborResult<Self> {
        Self::new(OptionKind::Put, strike)
    }

    /// Builds an option from the flag triple used by scenario files.
    ///
    /// Returns `Ok(None)` when `has_option` is false; `is_call` and `strike`
    /// are then ignored.
    pub fn from_flags(has_option: bool, is_call: bool, strike: f64) -> ArborResult<Option<Self>> {
        if !has_option {
            return Ok(None);
        }
        let kind = if is_call {
            OptionKind::Call
        } else {
            OptionKind::Put
        };
        Self::new(kind, strike).map(Some)
    }

    /// Returns the option kind.
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns the strike.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Applies the exercise bound to a node value.
    ///
    /// Call: `min(value, strike)`. Put: `max(value, strike)`.
    #[must_use]
    pub fn exercise(&self, value: f64) -> f64 {
        match self.kind {
            OptionKind::Call => value.min(self.strike),
            OptionKind::Put => value.max(self.strike),
        }
    }
}

impl fmt::Display for EmbeddedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, self.strike)
    }
}
