//! Fixed-coupon bond with an optional embedded option.

use std::fmt;

use serde::Serialize;

use super::{CashFlowSchedule, EmbeddedOption};
use crate::error::{ArborError, ArborResult};

/// Months per year, used to turn the coupon interval into a year fraction.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// A fixed-coupon bullet bond priced on a binomial rate lattice.
///
/// Coupon interval and maturity are both whole months, and the interval
/// must divide the maturity evenly. The quotient is the number of coupon
/// periods, which is also the depth of the rate tree used to price it.
///
/// # Example
///
/// ```
/// use arbor_core::types::Bond;
///
/// let bond = Bond::new(100.0, 0.045, 6, 24).unwrap();
/// assert_eq!(bond.periods(), 4);
/// assert!((bond.coupon_amount() - 2.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bond {
    face_value: f64,
    coupon_rate: f64,
    frequency_months: u32,
    maturity_months: u32,
    periods: usize,
    option: Option<EmbeddedOption>,
}

impl Bond {
    /// Creates a plain bond without an embedded option.
    ///
    /// # Arguments
    ///
    /// * `face_value` - Redemption amount, positive
    /// * `coupon_rate` - Annual coupon as a decimal (0.045 = 4.5%), non-negative
    /// * `frequency_months` - Coupon interval in months, positive
    /// * `maturity_months` - Life of the bond in months, a multiple of the interval
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        frequency_months: u32,
        maturity_months: u32,
    ) -> ArborResult<Self> {
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(ArborError::invalid_bond(format!(
                "face value must be positive and finite, got {face_value}"
            )));
        }
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(ArborError::invalid_bond(format!(
                "coupon rate must be non-negative and finite, got {coupon_rate}"
            )));
        }
        if frequency_months == 0 {
            return Err(ArborError::invalid_bond(
                "coupon frequency must be at least one month",
            ));
        }
        if maturity_months % frequency_months != 0 {
            return Err(ArborError::invalid_bond(format!(
                "maturity of {maturity_months} months is not a whole number of \
                 {frequency_months}-month coupon periods"
            )));
        }

        Ok(Self {
            face_value,
            coupon_rate,
            frequency_months,
            maturity_months,
            periods: (maturity_months / frequency_months) as usize,
            option: None,
        })
    }

    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondBuilder {
        BondBuilder::new()
    }

    /// Attaches an embedded option, replacing any existing one.
    #[must_use]
    pub fn with_option(mut self, option: EmbeddedOption) -> Self {
        self.option = Some(option);
        self
    }

    /// Returns the same bond with the embedded option stripped.
    #[must_use]
    pub fn without_option(&self) -> Self {
        Self {
            option: None,
            ..self.clone()
        }
    }

    /// Redemption amount.
    #[must_use]
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupon interval in months.
    #[must_use]
    pub fn frequency_months(&self) -> u32 {
        self.frequency_months
    }

    /// Life of the bond in months.
    #[must_use]
    pub fn maturity_months(&self) -> u32 {
        self.maturity_months
    }

    /// Number of coupon periods, `maturity / frequency`.
    #[must_use]
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// The embedded option, if any.
    #[must_use]
    pub fn option(&self) -> Option<&EmbeddedOption> {
        self.option.as_ref()
    }

    /// Returns true if the bond carries an embedded option.
    #[must_use]
    pub fn has_option(&self) -> bool {
        self.option.is_some()
    }

    /// Length of one coupon period in years (`frequency / 12`).
    #[must_use]
    pub fn period_fraction(&self) -> f64 {
        f64::from(self.frequency_months) / MONTHS_PER_YEAR
    }

    /// Coupon paid each period: `coupon_rate * face_value * period_fraction`.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        self.coupon_rate * self.face_value * self.period_fraction()
    }

    /// Builds the per-level coupon schedule (`periods + 1` entries, first is zero).
    #[must_use]
    pub fn cash_flows(&self) -> CashFlowSchedule {
        CashFlowSchedule::level_coupons(self.periods, self.coupon_amount())
    }

    /// Amount due at maturity before any option bound: final coupon plus face.
    #[must_use]
    pub fn redemption_amount(&self) -> f64 {
        self.cash_flows().terminal() + self.face_value
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bond(face_value={}, coupon_rate={}, frequency={}, maturity={}, periods={}",
            self.face_value,
            self.coupon_rate,
            self.frequency_months,
            self.maturity_months,
            self.periods
        )?;
        if let Some(option) = &self.option {
            write!(f, ", option={option}")?;
        }
        write!(f, ")")
    }
}

/// Builder for [`Bond`].
///
/// # Example
///
/// ```
/// use arbor_core::types::{Bond, OptionKind};
///
/// let bond = Bond::builder()
///     .face_value(100.0)
///     .coupon_rate(0.05)
///     .frequency_months(6)
///     .maturity_months(24)
///     .call(104.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(bond.option().unwrap().kind(), OptionKind::Call);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BondBuilder {
    face_value: Option<f64>,
    coupon_rate: Option<f64>,
    frequency_months: Option<u32>,
    maturity_months: Option<u32>,
    call_strike: Option<f64>,
    put_strike: Option<f64>,
}

impl BondBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the face value.
    #[must_use]
    pub fn face_value(mut self, face_value: f64) -> Self {
        self.face_value = Some(face_value);
        self
    }

    /// Sets the annual coupon rate (decimal).
    #[must_use]
    pub fn coupon_rate(mut self, coupon_rate: f64) -> Self {
        self.coupon_rate = Some(coupon_rate);
        self
    }

    /// Sets the coupon interval in months.
    #[must_use]
    pub fn frequency_months(mut self, months: u32) -> Self {
        self.frequency_months = Some(months);
        self
    }

    /// Sets the maturity in months.
    #[must_use]
    pub fn maturity_months(mut self, months: u32) -> Self {
        self.maturity_months = Some(months);
        self
    }

    /// Embeds a call at the given strike.
    #[must_use]
    pub fn call(mut self, strike: f64) -> Self {
        self.call_strike = Some(strike);
        self
    }

    /// Embeds a put at the given strike.
    #[must_use]
    pub fn put(mut self, strike: f64) -> Self {
        self.put_strike = Some(strike);
        self
    }

    /// Validates the inputs and builds the bond.
    pub fn build(self) -> ArborResult<Bond> {
        let face_value = self
            .face_value
            .ok_or_else(|| ArborError::missing_field("face_value"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| ArborError::missing_field("coupon_rate"))?;
        let frequency = self
            .frequency_months
            .ok_or_else(|| ArborError::missing_field("frequency_months"))?;
        let maturity = self
            .maturity_months
            .ok_or_else(|| ArborError::missing_field("maturity_months"))?;

        let bond = Bond::new(face_value, coupon_rate, frequency, maturity)?;

        match (self.call_strike, self.put_strike) {
            (Some(_), Some(_)) => Err(ArborError::invalid_bond(
                "a bond carries at most one embedded option, got both call and put",
            )),
            (Some(strike), None) => Ok(bond.with_option(EmbeddedOption::call(strike)?)),
            (None, Some(strike)) => Ok(bond.with_option(EmbeddedOption::put(strike)?)),
            (None, None) => Ok(bond),
        }
    }
}
