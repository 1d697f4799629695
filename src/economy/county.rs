//! County economy - the unit that owns people, labor, and goods

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::EconomyConfig;
use crate::core::types::{CountyId, GoodId};
use crate::economy::labor::LaborPool;
use crate::economy::stockpile::Stockpile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountyEconomy {
    pub id: CountyId,
    population: u32,
    pub labor: LaborPool,
    pub stockpile: Stockpile,
    /// Shortfall per good from the latest consumption tick; only positive entries
    unmet_demand: BTreeMap<GoodId, f64>,
    /// Derived from terrain by the map layer; read-only during ticks
    resource_abundance: AHashMap<GoodId, f64>,
}

impl CountyEconomy {
    /// Empty county: no people, no workers, no goods
    pub fn new(id: CountyId) -> Self {
        Self {
            id,
            population: 0,
            labor: LaborPool::new(),
            stockpile: Stockpile::new(),
            unmet_demand: BTreeMap::new(),
            resource_abundance: AHashMap::new(),
        }
    }

    /// County whose labor pool and stockpile follow `config`
    pub fn with_population(id: CountyId, population: u32, config: &EconomyConfig) -> Self {
        let mut county = Self::new(id);
        county.stockpile = Stockpile::with_default_capacity(config.stockpile_capacity);
        county.set_population(population, config);
        county
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    /// Change population and rebuild the labor pool totals from it
    pub fn set_population(&mut self, population: u32, config: &EconomyConfig) {
        self.population = population;
        for (category, workers) in config.labor_force(population) {
            self.labor.set_total(category, workers);
        }
    }

    /// Abundance factor for a good, 0.0 when the land yields none
    pub fn resource_abundance(&self, good: GoodId) -> f64 {
        self.resource_abundance.get(&good).copied().unwrap_or(0.0)
    }

    /// Negative or NaN factors are stored as 0.0
    pub fn set_resource_abundance(&mut self, good: GoodId, abundance: f64) {
        let abundance = if abundance.is_nan() { 0.0 } else { abundance.max(0.0) };
        self.resource_abundance.insert(good, abundance);
    }

    pub fn unmet_demand(&self) -> &BTreeMap<GoodId, f64> {
        &self.unmet_demand
    }

    pub fn unmet_demand_for(&self, good: GoodId) -> Option<f64> {
        self.unmet_demand.get(&good).copied()
    }

    pub fn clear_unmet_demand(&mut self) {
        self.unmet_demand.clear();
    }

    /// Record a shortfall; zero or negative shortfalls are not stored
    pub fn record_unmet_demand(&mut self, good: GoodId, unmet: f64) {
        if unmet > 0.0 {
            self.unmet_demand.insert(good, unmet);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LaborCategory;

    #[test]
    fn test_with_population_builds_labor_pool() {
        let config = EconomyConfig::default();
        let county = CountyEconomy::with_population(CountyId(1), 1000, &config);

        assert_eq!(county.population(), 1000);
        assert_eq!(county.labor.total(LaborCategory::Unskilled), 450);
        assert_eq!(county.labor.total(LaborCategory::Skilled), 150);
    }

    #[test]
    fn test_abundance_clamped_non_negative() {
        let mut county = CountyEconomy::new(CountyId(1));
        county.set_resource_abundance(GoodId(0), -2.0);
        county.set_resource_abundance(GoodId(1), f64::NAN);
        county.set_resource_abundance(GoodId(2), 1.5);

        assert_eq!(county.resource_abundance(GoodId(0)), 0.0);
        assert_eq!(county.resource_abundance(GoodId(1)), 0.0);
        assert_eq!(county.resource_abundance(GoodId(2)), 1.5);
        assert_eq!(county.resource_abundance(GoodId(3)), 0.0);
    }

    #[test]
    fn test_unmet_demand_only_stores_positive() {
        let mut county = CountyEconomy::new(CountyId(1));
        county.record_unmet_demand(GoodId(2), 0.0);
        county.record_unmet_demand(GoodId(3), 20.0);

        assert_eq!(county.unmet_demand_for(GoodId(2)), None);
        assert_eq!(county.unmet_demand_for(GoodId(3)), Some(20.0));

        county.clear_unmet_demand();
        assert!(county.unmet_demand().is_empty());
    }
}
