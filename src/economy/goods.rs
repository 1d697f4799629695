//! Goods catalog - static definitions of tradeable goods
//!
//! Each good has a per-capita consumption rate, a classification, and an
//! optional recipe: the inputs consumed to make one batch (one unit) of it.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EconError, Result};
use crate::core::types::GoodId;

/// How a good is used in the economy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoodCategory {
    /// Extracted from the land (grain, ore, timber)
    Raw,
    /// Processed but only used as an input (flour, iron)
    Intermediate,
    /// Consumed by the population
    Consumer,
}

impl GoodCategory {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "raw" => Some(GoodCategory::Raw),
            "intermediate" => Some(GoodCategory::Intermediate),
            "consumer" => Some(GoodCategory::Consumer),
            _ => None,
        }
    }
}

/// One input line of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub good: GoodId,
    /// Units consumed per batch
    pub quantity: f64,
}

/// Definition of a good
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodDef {
    pub id: GoodId,
    pub name: String,
    pub category: GoodCategory,
    /// Units consumed per person per day
    pub base_consumption: f64,
    /// Staple foods; a shortfall here marks a county as starving
    pub staple: bool,
    /// Inputs per batch, in declaration order. Empty means no recipe.
    pub recipe: Vec<RecipeInput>,
}

impl GoodDef {
    pub fn new(id: GoodId, name: impl Into<String>, category: GoodCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            base_consumption: 0.0,
            staple: false,
            recipe: Vec::new(),
        }
    }

    pub fn with_consumption(mut self, per_capita: f64) -> Self {
        self.base_consumption = per_capita;
        self
    }

    pub fn staple(mut self) -> Self {
        self.staple = true;
        self
    }

    pub fn with_input(mut self, good: GoodId, quantity: f64) -> Self {
        self.recipe.push(RecipeInput { good, quantity });
        self
    }

    pub fn has_recipe(&self) -> bool {
        !self.recipe.is_empty()
    }

    pub fn is_consumer(&self) -> bool {
        self.category == GoodCategory::Consumer
    }
}

/// Read-only registry of goods, iterated in id order
#[derive(Debug, Clone, Default)]
pub struct GoodsCatalog {
    goods: BTreeMap<GoodId, GoodDef>,
    by_name: AHashMap<String, GoodId>,
}

impl GoodsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in goods, matching `data/economy.toml`
    pub fn with_defaults() -> Self {
        use GoodCategory::*;

        let mut catalog = Self::new();
        let defs = [
            GoodDef::new(GoodId(0), "grain", Raw),
            GoodDef::new(GoodId(1), "flour", Intermediate).with_input(GoodId(0), 2.0),
            GoodDef::new(GoodId(2), "bread", Consumer)
                .with_consumption(0.1)
                .staple()
                .with_input(GoodId(1), 1.0),
            GoodDef::new(GoodId(3), "iron_ore", Raw),
            GoodDef::new(GoodId(4), "iron", Intermediate)
                .with_input(GoodId(3), 2.0)
                .with_input(GoodId(6), 1.0),
            GoodDef::new(GoodId(5), "tools", Consumer)
                .with_consumption(0.002)
                .with_input(GoodId(4), 1.0)
                .with_input(GoodId(6), 1.0),
            GoodDef::new(GoodId(6), "timber", Raw),
            GoodDef::new(GoodId(7), "lumber", Intermediate).with_input(GoodId(6), 2.0),
            GoodDef::new(GoodId(8), "furniture", Consumer)
                .with_consumption(0.002)
                .with_input(GoodId(7), 3.0),
            GoodDef::new(GoodId(9), "wool", Raw),
            GoodDef::new(GoodId(10), "cloth", Intermediate).with_input(GoodId(9), 2.0),
            GoodDef::new(GoodId(11), "clothes", Consumer)
                .with_consumption(0.01)
                .with_input(GoodId(10), 1.0),
            GoodDef::new(GoodId(12), "fish", Raw),
            GoodDef::new(GoodId(13), "salt", Raw),
            GoodDef::new(GoodId(14), "salted_fish", Consumer)
                .with_consumption(0.05)
                .staple()
                .with_input(GoodId(12), 2.0)
                .with_input(GoodId(13), 1.0),
        ];
        for def in defs {
            let added = catalog.add(def);
            debug_assert!(added.is_ok(), "built-in goods table is invalid: {:?}", added);
        }
        catalog
    }

    /// Add a good; ids and names must be unique
    pub fn add(&mut self, def: GoodDef) -> Result<()> {
        if self.goods.contains_key(&def.id) {
            return Err(EconError::Duplicate(def.id.to_string()));
        }
        if self.by_name.contains_key(&def.name) {
            return Err(EconError::Duplicate(def.name.clone()));
        }
        self.by_name.insert(def.name.clone(), def.id);
        self.goods.insert(def.id, def);
        Ok(())
    }

    pub fn get(&self, id: GoodId) -> Option<&GoodDef> {
        self.goods.get(&id)
    }

    pub fn id_by_name(&self, name: &str) -> Option<GoodId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: GoodId) -> &str {
        self.get(id).map(|g| g.name.as_str()).unwrap_or("<unknown>")
    }

    pub fn len(&self) -> usize {
        self.goods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }

    /// All goods in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &GoodDef> {
        self.goods.values()
    }

    /// Consumer goods in ascending id order
    pub fn consumer_goods(&self) -> impl Iterator<Item = &GoodDef> {
        self.goods.values().filter(|g| g.is_consumer())
    }

    /// Check every recipe input resolves to a good in this catalog
    pub fn validate_recipes(&self) -> Result<()> {
        for good in self.goods.values() {
            for input in &good.recipe {
                if !self.goods.contains_key(&input.good) {
                    return Err(EconError::DanglingRecipeInput {
                        good: good.id,
                        input: input.good,
                    });
                }
                if input.quantity.is_nan() || input.quantity <= 0.0 {
                    return Err(EconError::InvalidDefinition {
                        name: good.name.clone(),
                        reason: format!("recipe quantity {} must be positive", input.quantity),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        let catalog = GoodsCatalog::with_defaults();
        assert_eq!(catalog.len(), 15);
        assert!(catalog.validate_recipes().is_ok());

        let bread = catalog.get(catalog.id_by_name("bread").unwrap()).unwrap();
        assert!(bread.is_consumer());
        assert!(bread.staple);
        assert_eq!(bread.recipe.len(), 1);

        let grain = catalog.get(GoodId(0)).unwrap();
        assert_eq!(grain.category, GoodCategory::Raw);
        assert!(!grain.has_recipe());
    }

    #[test]
    fn test_consumer_goods_in_id_order() {
        let catalog = GoodsCatalog::with_defaults();
        let ids: Vec<GoodId> = catalog.consumer_goods().map(|g| g.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert!(ids.contains(&GoodId(2)));
        assert!(!ids.contains(&GoodId(0)));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = GoodsCatalog::new();
        catalog
            .add(GoodDef::new(GoodId(1), "salt", GoodCategory::Raw))
            .unwrap();

        let same_id = catalog.add(GoodDef::new(GoodId(1), "pepper", GoodCategory::Raw));
        assert!(matches!(same_id, Err(EconError::Duplicate(_))));

        let same_name = catalog.add(GoodDef::new(GoodId(2), "salt", GoodCategory::Raw));
        assert!(matches!(same_name, Err(EconError::Duplicate(_))));
    }

    #[test]
    fn test_dangling_recipe_input_detected() {
        let mut catalog = GoodsCatalog::new();
        catalog
            .add(GoodDef::new(GoodId(1), "beer", GoodCategory::Consumer).with_input(GoodId(9), 1.0))
            .unwrap();

        match catalog.validate_recipes() {
            Err(EconError::DanglingRecipeInput { good, input }) => {
                assert_eq!(good, GoodId(1));
                assert_eq!(input, GoodId(9));
            }
            other => panic!("Expected DanglingRecipeInput, got {:?}", other),
        }
    }

    #[test]
    fn test_name_of_unknown() {
        let catalog = GoodsCatalog::new();
        assert_eq!(catalog.name_of(GoodId(42)), "<unknown>");
    }
}
