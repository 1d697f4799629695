//! Stockpile - county-level goods storage

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::GoodId;
use crate::economy::state::sum_amounts;

/// Per-good inventory. Quantities are never negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stockpile {
    amounts: AHashMap<GoodId, f64>,
    /// Optional per-good ceiling; absent means unbounded
    capacities: AHashMap<GoodId, f64>,
    /// Ceiling for goods without an explicit capacity
    default_capacity: Option<f64>,
}

impl Stockpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stockpile where every good shares the same ceiling
    pub fn with_default_capacity(capacity: Option<f64>) -> Self {
        Self {
            default_capacity: capacity,
            ..Self::default()
        }
    }

    pub fn set_capacity(&mut self, good: GoodId, capacity: f64) {
        self.capacities.insert(good, capacity.max(0.0));
    }

    pub fn capacity(&self, good: GoodId) -> Option<f64> {
        self.capacities.get(&good).copied().or(self.default_capacity)
    }

    /// Current amount of a good
    pub fn get(&self, good: GoodId) -> f64 {
        self.amounts.get(&good).copied().unwrap_or(0.0)
    }

    /// Add goods, returns amount actually added
    ///
    /// Non-positive or NaN amounts add nothing.
    pub fn add(&mut self, good: GoodId, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let space = match self.capacity(good) {
            Some(cap) => (cap - self.get(good)).max(0.0),
            None => f64::INFINITY,
        };
        let added = amount.min(space);
        if added > 0.0 {
            *self.amounts.entry(good).or_insert(0.0) += added;
        }
        added
    }

    /// Remove goods, returns amount actually removed
    ///
    /// Never removes more than requested or more than is on hand.
    pub fn remove(&mut self, good: GoodId, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        match self.amounts.get_mut(&good) {
            Some(current) => {
                let removed = amount.min(*current);
                *current -= removed;
                // Guard against tiny negative residue from float subtraction
                if *current < 0.0 {
                    *current = 0.0;
                }
                removed
            }
            None => 0.0,
        }
    }

    /// Sum of all quantities on hand, summed in good id order
    pub fn total(&self) -> f64 {
        sum_amounts(self.entries().iter().map(|(_, amount)| amount))
    }

    /// Non-empty entries sorted by good id
    pub fn entries(&self) -> Vec<(GoodId, f64)> {
        let mut entries: Vec<_> = self
            .amounts
            .iter()
            .filter(|(_, amount)| **amount > 0.0)
            .map(|(good, amount)| (*good, *amount))
            .collect();
        entries.sort_by_key(|(good, _)| *good);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WOOL: GoodId = GoodId(9);

    #[test]
    fn test_stockpile_add_remove() {
        let mut stockpile = Stockpile::new();
        assert_eq!(stockpile.add(WOOL, 30.0), 30.0);
        assert_eq!(stockpile.get(WOOL), 30.0);

        assert_eq!(stockpile.remove(WOOL, 20.0), 20.0);
        assert_eq!(stockpile.get(WOOL), 10.0);
    }

    #[test]
    fn test_remove_bounded_by_available() {
        let mut stockpile = Stockpile::new();
        stockpile.add(WOOL, 30.0);

        assert_eq!(stockpile.remove(WOOL, 50.0), 30.0);
        assert_eq!(stockpile.get(WOOL), 0.0);

        // Nothing left, nothing removed
        assert_eq!(stockpile.remove(WOOL, 5.0), 0.0);
        // Unknown good
        assert_eq!(stockpile.remove(GoodId(99), 5.0), 0.0);
    }

    #[test]
    fn test_non_positive_amounts_ignored() {
        let mut stockpile = Stockpile::new();
        stockpile.add(WOOL, 10.0);

        assert_eq!(stockpile.add(WOOL, -5.0), 0.0);
        assert_eq!(stockpile.remove(WOOL, -5.0), 0.0);
        assert_eq!(stockpile.add(WOOL, f64::NAN), 0.0);
        assert_eq!(stockpile.get(WOOL), 10.0);
    }

    #[test]
    fn test_capacity_bounds_add() {
        let mut stockpile = Stockpile::new();
        stockpile.set_capacity(WOOL, 50.0);

        assert_eq!(stockpile.add(WOOL, 30.0), 30.0);
        // Can't exceed capacity
        assert_eq!(stockpile.add(WOOL, 30.0), 20.0);
        assert_eq!(stockpile.get(WOOL), 50.0);
    }

    #[test]
    fn test_default_capacity_applies_to_every_good() {
        let mut stockpile = Stockpile::with_default_capacity(Some(5.0));
        assert_eq!(stockpile.add(GoodId(1), 8.0), 5.0);
        assert_eq!(stockpile.add(GoodId(2), 8.0), 5.0);

        stockpile.set_capacity(GoodId(3), 100.0);
        assert_eq!(stockpile.add(GoodId(3), 8.0), 8.0);
    }

    #[test]
    fn test_entries_sorted_and_non_empty() {
        let mut stockpile = Stockpile::new();
        stockpile.add(GoodId(5), 1.0);
        stockpile.add(GoodId(2), 2.0);
        stockpile.add(GoodId(8), 3.0);
        stockpile.remove(GoodId(8), 3.0);

        assert_eq!(stockpile.entries(), vec![(GoodId(2), 2.0), (GoodId(5), 1.0)]);
        assert_eq!(stockpile.total(), 3.0);
    }
}
