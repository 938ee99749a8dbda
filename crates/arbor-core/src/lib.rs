//! # Arbor Core
//!
//! Binomial short-rate lattice valuation of fixed-coupon bonds with optional
//! embedded call or put.
//!
//! This crate provides:
//!
//! - **Types**: [`Bond`](types::Bond), [`EmbeddedOption`](types::EmbeddedOption),
//!   and the per-level [`CashFlowSchedule`](types::CashFlowSchedule)
//! - **Tree**: [`build_tree`](tree::build_tree) grows a full binary tree of
//!   short rates from an initial rate and constant up/down factors
//! - **Pricing**: [`BondValuator`](pricing::BondValuator) values the bond by
//!   backward induction from maturity to the root
//!
//! ## Example
//!
//! ```rust
//! use arbor_core::prelude::*;
//!
//! // 2-year semi-annual 5% bond, callable at 104
//! let bond = Bond::new(100.0, 0.05, 6, 24)?
//!     .with_option(EmbeddedOption::call(104.0)?);
//!
//! let mut tree = build_tree(0.035, 1.1, 0.95, bond.periods() as i64)?;
//! let price = price(&bond, &mut tree, 0.55, 0.45)?;
//!
//! assert!((price - 102.1301).abs() < 1e-4);
//! # Ok::<(), arbor_core::ArborError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod pricing;
pub mod tree;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ArborError, ArborResult};
    pub use crate::pricing::{price, BondValuator, OptionDecomposition, Valuation};
    pub use crate::tree::{build_tree, NodeId, RateNode, RateTree, MAX_PERIODS};
    pub use crate::types::{Bond, BondBuilder, CashFlowSchedule, EmbeddedOption, OptionKind};
}

pub use error::{ArborError, ArborResult};
pub use pricing::{price, BondValuator};
pub use tree::{build_tree, RateTree};
pub use types::{Bond, EmbeddedOption, OptionKind};
