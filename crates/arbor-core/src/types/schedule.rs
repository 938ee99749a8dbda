//! Per-level coupon schedule.

use serde::Serialize;

/// Coupon cash flows indexed by tree level.
///
/// A schedule for `n` periods has `n + 1` entries, one per lattice level.
/// Entry 0 is always zero (nothing is paid at time zero); every later entry
/// is the periodic coupon. Redemption is not included: the valuator adds the
/// face value at the final level.
///
/// Schedules are only built through [`level_coupons`](Self::level_coupons),
/// so they always hold at least the time-zero entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowSchedule {
    flows: Vec<f64>,
}

impl CashFlowSchedule {
    /// Creates a level schedule paying `coupon` at levels `1..=periods`.
    #[must_use]
    pub fn level_coupons(periods: usize, coupon: f64) -> Self {
        let mut flows = vec![coupon; periods + 1];
        flows[0] = 0.0;
        Self { flows }
    }

    /// Returns the cash flow paid at `level`, or `None` past the last level.
    #[must_use]
    pub fn coupon_at(&self, level: usize) -> Option<f64> {
        self.flows.get(level).copied()
    }

    /// Returns the cash flow at the final level.
    #[must_use]
    pub fn terminal(&self) -> f64 {
        self.flows[self.flows.len() - 1]
    }

    /// Number of coupon periods covered (one less than the entry count).
    #[must_use]
    pub fn periods(&self) -> usize {
        self.flows.len() - 1
    }

    /// Number of entries (`periods + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// False for every schedule built by `level_coupons`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.flows
    }

    /// Iterates over `(level, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.flows.iter().copied().enumerate()
    }

    /// Sum of all coupon entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_coupons() {
        let schedule = CashFlowSchedule::level_coupons(4, 2.25);
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.periods(), 4);
        assert_eq!(schedule.as_slice(), &[0.0, 2.25, 2.25, 2.25, 2.25]);
        assert_eq!(schedule.terminal(), 2.25);
        assert!((schedule.total() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_periods() {
        let schedule = CashFlowSchedule::level_coupons(0, 2.5);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.coupon_at(0), Some(0.0));
        assert_eq!(schedule.terminal(), 0.0);
        assert!(!schedule.is_empty());
    }

    #[test]
    fn test_serialized_schedule_keeps_time_zero_entry() {
        let json = serde_json::to_value(CashFlowSchedule::level_coupons(2, 1.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "flows": [0.0, 1.5, 1.5] }));

        let zero = CashFlowSchedule::level_coupons(0, 1.5);
        assert_eq!(zero.periods(), 0);
        assert_eq!(zero.total(), 0.0);
    }

    #[test]
    fn test_coupon_at_out_of_range() {
        let schedule = CashFlowSchedule::level_coupons(2, 1.0);
        assert_eq!(schedule.coupon_at(2), Some(1.0));
        assert_eq!(schedule.coupon_at(3), None);
    }

    #[test]
    fn test_iter() {
        let schedule = CashFlowSchedule::level_coupons(2, 3.0);
        let pairs: Vec<_> = schedule.iter().collect();
        assert_eq!(pairs, vec![(0, 0.0), (1, 3.0), (2, 3.0)]);
    }
}
