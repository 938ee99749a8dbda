//! Binomial short-rate tree.
//!
//! This module provides:
//!
//! - **Builder**: [`build_tree`] grows a full binary tree of short rates from
//!   an initial rate and constant up/down factors
//! - **Nodes**: [`RateNode`] holds the rate, level, navigation links, and the
//!   bond value written during valuation
//!
//! Nodes live in a single arena owned by [`RateTree`]; links between them are
//! [`NodeId`] indices, so parent references never own anything.

mod builder;
mod node;

pub use builder::{build_tree, RateTree, MAX_PERIODS};
pub use node::{NodeId, RateNode};
