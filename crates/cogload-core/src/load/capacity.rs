//! Running capacity balance across the day.

use super::clamp::round3;

/// Capacity every day starts with.
pub const DAILY_CAPACITY: f64 = 100.0;

/// Left-to-right depletion of the daily capacity pool.
///
/// Capacity only ever goes down and never below zero. Recovery time is
/// informational and is not credited back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityFold {
    remaining: f64,
}

impl Default for CapacityFold {
    fn default() -> Self {
        Self::new()
    }
}

impl CapacityFold {
    pub fn new() -> Self {
        Self {
            remaining: DAILY_CAPACITY,
        }
    }

    /// Spend `cost` and return the balance left afterwards.
    pub fn apply(&mut self, cost: f64) -> f64 {
        self.remaining = round3((self.remaining - cost.max(0.0)).max(0.0));
        self.remaining
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }
}

/// Balance snapshot after each cost, in order.
pub fn fold_capacity<I>(costs: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut fold = CapacityFold::new();
    costs.into_iter().map(|cost| fold.apply(cost)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full() {
        assert_eq!(CapacityFold::new().remaining(), DAILY_CAPACITY);
    }

    #[test]
    fn depletes_to_zero_and_stays_there() {
        let snapshots = fold_capacity(std::iter::repeat(10.0).take(11));
        assert_eq!(snapshots.len(), 11);
        assert_eq!(snapshots[0], 90.0);
        assert_eq!(snapshots[8], 10.0);
        assert_eq!(snapshots[9], 0.0);
        assert_eq!(snapshots[10], 0.0);
    }

    #[test]
    fn never_increases() {
        let snapshots = fold_capacity([11.25, 0.0, 37.5, 60.0, 3.0]);
        assert_eq!(snapshots, vec![88.75, 88.75, 51.25, 0.0, 0.0]);
        assert!(snapshots.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn empty_day_has_no_snapshots() {
        assert!(fold_capacity(Vec::new()).is_empty());
    }
}
