//! Labor pool - per-category worker availability for one county

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::LaborCategory;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Workforce {
    total: u32,
    available: u32,
}

/// Workers partitioned by labor category
///
/// `reset` restores full availability once per tick; within a tick
/// `allocate` only ever draws the pool down.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaborPool {
    categories: AHashMap<LaborCategory, Workforce>,
}

impl LaborPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total for a category; availability is restored to the new total
    pub fn set_total(&mut self, category: LaborCategory, total: u32) {
        self.categories.insert(
            category,
            Workforce {
                total,
                available: total,
            },
        );
    }

    pub fn total(&self, category: LaborCategory) -> u32 {
        self.categories.get(&category).map(|w| w.total).unwrap_or(0)
    }

    pub fn available(&self, category: LaborCategory) -> u32 {
        self.categories.get(&category).map(|w| w.available).unwrap_or(0)
    }

    /// Workers drawn this tick in a category
    pub fn allocated(&self, category: LaborCategory) -> u32 {
        self.categories
            .get(&category)
            .map(|w| w.total - w.available)
            .unwrap_or(0)
    }

    /// Restore every category to full availability
    pub fn reset(&mut self) {
        for workforce in self.categories.values_mut() {
            workforce.available = workforce.total;
        }
    }

    /// Request workers, returns how many were granted (0..=requested)
    pub fn allocate(&mut self, category: LaborCategory, requested: u32) -> u32 {
        match self.categories.get_mut(&category) {
            Some(workforce) => {
                let granted = requested.min(workforce.available);
                workforce.available -= granted;
                granted
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_bounded_by_available() {
        let mut pool = LaborPool::new();
        pool.set_total(LaborCategory::Unskilled, 25);

        assert_eq!(pool.allocate(LaborCategory::Unskilled, 20), 20);
        assert_eq!(pool.available(LaborCategory::Unskilled), 5);
        // Partial grant
        assert_eq!(pool.allocate(LaborCategory::Unskilled, 20), 5);
        // Exhausted
        assert_eq!(pool.allocate(LaborCategory::Unskilled, 20), 0);
        assert_eq!(pool.allocated(LaborCategory::Unskilled), 25);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut pool = LaborPool::new();
        pool.set_total(LaborCategory::Unskilled, 10);
        pool.set_total(LaborCategory::Skilled, 3);

        pool.allocate(LaborCategory::Unskilled, 10);
        assert_eq!(pool.available(LaborCategory::Skilled), 3);
        assert_eq!(pool.allocate(LaborCategory::Skilled, 4), 3);
    }

    #[test]
    fn test_missing_category_grants_nothing() {
        let mut pool = LaborPool::new();
        assert_eq!(pool.allocate(LaborCategory::Skilled, 4), 0);
    }

    #[test]
    fn test_reset_restores_without_accumulating() {
        let mut pool = LaborPool::new();
        pool.set_total(LaborCategory::Unskilled, 10);

        pool.allocate(LaborCategory::Unskilled, 7);
        pool.reset();
        assert_eq!(pool.available(LaborCategory::Unskilled), 10);

        // Resetting an untouched pool never exceeds the total
        pool.reset();
        pool.reset();
        assert_eq!(pool.available(LaborCategory::Unskilled), 10);
    }
}
