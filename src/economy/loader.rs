//! Load goods and facility definitions from TOML
//!
//! Definitions reference each other by name; ids are assigned in declaration
//! order. Every reference is resolved and validated before anything is
//! returned, so a loaded catalog never has dangling recipe inputs or outputs.

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{EconError, Result};
use crate::core::types::{FacilityTypeId, GoodId, LaborCategory};
use crate::economy::facility::{FacilityDef, FacilityRegistry};
use crate::economy::goods::{GoodCategory, GoodDef, GoodsCatalog, RecipeInput};
use crate::economy::state::EconomyState;

/// A validated goods catalog and facility registry
#[derive(Debug, Clone)]
pub struct EconomyDefs {
    pub goods: GoodsCatalog,
    pub facility_types: FacilityRegistry,
}

impl EconomyDefs {
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: TomlEconomy = toml::from_str(content)?;

        let mut goods = GoodsCatalog::new();
        let names: Vec<&str> = file.goods.iter().map(|g| g.name.as_str()).collect();
        for (idx, good) in file.goods.iter().enumerate() {
            goods.add(good.to_def(GoodId(idx as u16), &names)?)?;
        }
        goods.validate_recipes()?;

        let mut facility_types = FacilityRegistry::new();
        for (idx, facility) in file.facilities.iter().enumerate() {
            facility_types.add(facility.to_def(FacilityTypeId(idx as u16), &goods)?)?;
        }

        Ok(Self {
            goods,
            facility_types,
        })
    }

    /// Empty economy state over these definitions
    pub fn into_state(self) -> EconomyState {
        EconomyState::new(self.goods, self.facility_types)
    }
}

/// TOML representation of the economy data file
#[derive(Debug, Deserialize)]
struct TomlEconomy {
    #[serde(default)]
    goods: Vec<TomlGood>,
    #[serde(default)]
    facilities: Vec<TomlFacility>,
}

#[derive(Debug, Deserialize)]
struct TomlGood {
    name: String,
    category: String,
    #[serde(default)]
    consumption: f64,
    #[serde(default)]
    staple: bool,
    #[serde(default)]
    inputs: Vec<TomlInput>,
}

#[derive(Debug, Deserialize)]
struct TomlInput {
    good: String,
    quantity: f64,
}

#[derive(Debug, Deserialize)]
struct TomlFacility {
    name: String,
    extraction: bool,
    output: String,
    labor: String,
    labor_required: u32,
    throughput: f64,
}

fn resolve_name(names: &[&str], name: &str) -> Result<GoodId> {
    names
        .iter()
        .position(|n| *n == name)
        .map(|idx| GoodId(idx as u16))
        .ok_or_else(|| EconError::UnknownGood(name.to_string()))
}

impl TomlGood {
    fn to_def(&self, id: GoodId, names: &[&str]) -> Result<GoodDef> {
        let category = GoodCategory::parse(&self.category)
            .ok_or_else(|| EconError::UnknownGoodCategory(self.category.clone()))?;

        if self.consumption.is_nan() || self.consumption < 0.0 {
            return Err(EconError::InvalidDefinition {
                name: self.name.clone(),
                reason: format!("consumption {} must be non-negative", self.consumption),
            });
        }

        let recipe = self
            .inputs
            .iter()
            .map(|input| {
                Ok(RecipeInput {
                    good: resolve_name(names, &input.good)?,
                    quantity: input.quantity,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(GoodDef {
            id,
            name: self.name.clone(),
            category,
            base_consumption: self.consumption,
            staple: self.staple,
            recipe,
        })
    }
}

impl TomlFacility {
    fn to_def(&self, id: FacilityTypeId, goods: &GoodsCatalog) -> Result<FacilityDef> {
        let output = goods
            .id_by_name(&self.output)
            .ok_or_else(|| EconError::UnknownGood(self.output.clone()))?;
        let labor_category = LaborCategory::parse(&self.labor)
            .ok_or_else(|| EconError::UnknownLaborCategory(self.labor.clone()))?;

        // A processing facility whose output has no recipe could never run
        let has_recipe = goods.get(output).map(|g| g.has_recipe()).unwrap_or(false);
        if !self.extraction && !has_recipe {
            return Err(EconError::InvalidDefinition {
                name: self.name.clone(),
                reason: format!("processing facility outputs {} which has no recipe", self.output),
            });
        }

        Ok(FacilityDef {
            id,
            name: self.name.clone(),
            extraction: self.extraction,
            output,
            labor_category,
            labor_required: self.labor_required,
            base_throughput: self.throughput,
        })
    }
}
