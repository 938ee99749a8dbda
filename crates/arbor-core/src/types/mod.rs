//! Instrument types: the bond, its embedded option, and its coupon schedule.

mod bond;
mod option;
mod schedule;

pub use bond::{Bond, BondBuilder, MONTHS_PER_YEAR};
pub use option::{EmbeddedOption, OptionKind};
pub use schedule::CashFlowSchedule;
