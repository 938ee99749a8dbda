//! Backward-induction bond valuator.
//!
//! Values are written level by level from maturity to the root. At the final
//! level each node holds the redemption amount (face value plus final
//! coupon). At an interior node with short rate `r`, each child value is
//! discounted one period at the node's own rate, the coupon due at the
//! node's level is added, and the embedded option bound is applied per
//! branch:
//!
//! ```text
//! up   = bound(V_up   / (1 + r * dt) + c_k)
//! down = bound(V_down / (1 + r * dt) + c_k)
//! V    = p_up * up + p_down * down
//! ```
//!
//! where `bound` is `min(·, K)` for a call, `max(·, K)` for a put and the
//! identity otherwise. The coupon enters before the bound, so the option
//! acts on the coupon-inclusive value. With no option and probabilities
//! summing to one this is the same as adding the coupon after the
//! expectation.

use log::{debug, warn};

use super::valuation::{OptionDecomposition, Valuation};
use crate::error::{ArborError, ArborResult};
use crate::tree::{RateNode, RateTree};
use crate::types::Bond;

/// Largest accepted deviation of `up_prob + down_prob` from one before a
/// warning is logged.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Prices bonds on a [`RateTree`] with fixed risk-neutral probabilities.
///
/// # Example
///
/// ```
/// use arbor_core::pricing::BondValuator;
/// use arbor_core::tree::build_tree;
/// use arbor_core::types::Bond;
///
/// let bond = Bond::new(100.0, 0.045, 6, 24).unwrap();
/// let mut tree = build_tree(0.05, 1.05, 0.95, bond.periods() as i64).unwrap();
///
/// let valuator = BondValuator::new(0.55, 0.45).unwrap();
/// let price = valuator.price(&bond, &mut tree).unwrap();
/// assert!((price - 98.9919).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondValuator {
    up_prob: f64,
    down_prob: f64,
}

impl BondValuator {
    /// Creates a valuator.
    ///
    /// Both probabilities must be finite and non-negative. They are not
    /// required to sum to one, but a warning is logged when they don't.
    pub fn new(up_prob: f64, down_prob: f64) -> ArborResult<Self> {
        for (name, prob) in [("up_prob", up_prob), ("down_prob", down_prob)] {
            if !prob.is_finite() || prob < 0.0 {
                return Err(ArborError::invalid_probability(
                    name,
                    prob,
                    "must be non-negative and finite",
                ));
            }
        }

        let total = up_prob + down_prob;
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            warn!(
                "up/down probabilities sum to {} rather than 1; prices are not risk-neutral",
                total
            );
        }

        Ok(Self { up_prob, down_prob })
    }

    /// Probability of an up move.
    #[must_use]
    pub fn up_prob(&self) -> f64 {
        self.up_prob
    }

    /// Probability of a down move.
    #[must_use]
    pub fn down_prob(&self) -> f64 {
        self.down_prob
    }

    /// Prices the bond and returns the root value.
    pub fn price(&self, bond: &Bond, tree: &mut RateTree) -> ArborResult<f64> {
        self.value(bond, tree).map(|valuation| valuation.price)
    }

    /// Prices the bond and returns the price with its inputs.
    ///
    /// Any values left on the tree by an earlier valuation are discarded
    /// first; afterwards every node holds exactly one value.
    pub fn value(&self, bond: &Bond, tree: &mut RateTree) -> ArborResult<Valuation> {
        if bond.periods() != tree.periods() {
            return Err(ArborError::PeriodMismatch {
                tree_periods: tree.periods(),
                bond_periods: bond.periods(),
            });
        }

        debug!(
            "valuing {} on {}-period tree (p_up={}, p_down={})",
            bond,
            tree.periods(),
            self.up_prob,
            self.down_prob
        );

        let price = self.backward_induction(bond, tree)?;

        debug!("root value {}", price);

        Ok(Valuation {
            price,
            periods: tree.periods(),
            node_count: tree.node_count(),
            option: bond.option().copied(),
            cash_flows: bond.cash_flows(),
            up_prob: self.up_prob,
            down_prob: self.down_prob,
        })
    }

    /// Prices the bond with and without its embedded option.
    ///
    /// The tree is left holding the values of the bond with its option.
    pub fn decompose(&self, bond: &Bond, tree: &mut RateTree) -> ArborResult<OptionDecomposition> {
        let straight = self.price(&bond.without_option(), tree)?;
        let with_option = self.price(bond, tree)?;

        Ok(OptionDecomposition {
            straight,
            with_option,
            kind: bond.option().map(|option| option.kind()),
        })
    }

    /// Runs one valuation pass. A failed pass leaves no values on the tree.
    fn backward_induction(&self, bond: &Bond, tree: &mut RateTree) -> ArborResult<f64> {
        tree.clear_values();

        let result = self.fill_levels(bond, tree);
        if result.is_err() {
            tree.clear_values();
        }
        result
    }

    fn fill_levels(&self, bond: &Bond, tree: &mut RateTree) -> ArborResult<f64> {
        let periods = tree.periods();
        let cash_flows = bond.cash_flows();
        let period_fraction = bond.period_fraction();
        let option = bond.option().copied();
        let bound = |value: f64| option.map_or(value, |option| option.exercise(value));

        let terminal = bound(cash_flows.terminal() + bond.face_value());
        if !terminal.is_finite() {
            return Err(ArborError::NonFiniteValue {
                level: periods,
                value: terminal,
            });
        }
        for id in tree.level_ids(periods) {
            tree.set_value(id, terminal);
        }

        for level in (0..periods).rev() {
            let coupon = cash_flows.coupon_at(level).ok_or_else(|| {
                ArborError::pricing_failed(format!("no cash flow scheduled for level {level}"))
            })?;

            for id in tree.level_ids(level) {
                let value = {
                    let node = &tree.nodes()[id.index()];
                    let rate = node.rate();
                    let discount = 1.0 + rate * period_fraction;
                    if discount == 0.0 || !discount.is_finite() {
                        return Err(ArborError::DegenerateDiscount {
                            level,
                            rate,
                            discount,
                        });
                    }

                    let (up_child, down_child) = tree.children(id).ok_or_else(|| {
                        ArborError::pricing_failed(format!(
                            "interior node {id} at level {level} has no children"
                        ))
                    })?;

                    let up = bound(child_value(up_child)? / discount + coupon);
                    let down = bound(child_value(down_child)? / discount + coupon);

                    up * self.up_prob + down * self.down_prob
                };

                if !value.is_finite() {
                    return Err(ArborError::NonFiniteValue { level, value });
                }
                tree.set_value(id, value);
            }
        }

        tree.root()
            .bond_value()
            .ok_or_else(|| ArborError::pricing_failed("root was not valued"))
    }
}

fn child_value(node: &RateNode) -> ArborResult<f64> {
    node.bond_value().ok_or_else(|| {
        ArborError::pricing_failed(format!(
            "node at level {} read before it was valued",
            node.level()
        ))
    })
}

/// Prices a bond on a rate tree.
///
/// Shorthand for [`BondValuator::new`] followed by [`BondValuator::price`].
///
/// # Errors
///
/// Fails if the probabilities are invalid, if the tree depth differs from
/// the bond's period count, or if a discount factor degenerates.
pub fn price(bond: &Bond, tree: &mut RateTree, up_prob: f64, down_prob: f64) -> ArborResult<f64> {
    BondValuator::new(up_prob, down_prob)?.price(bond, tree)
}
