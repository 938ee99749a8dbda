//! Bond valuation on the short-rate tree.
//!
//! [`BondValuator`] runs a single backward-induction pass over a
//! [`RateTree`](crate::tree::RateTree), annotating every node with the bond
//! value and returning the root value as the price.

mod valuation;
mod valuator;

pub use valuation::{OptionDecomposition, Valuation};
pub use valuator::{price, BondValuator, PROBABILITY_TOLERANCE};
