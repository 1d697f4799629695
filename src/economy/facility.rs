//! Facility types and placed facilities
//!
//! A `FacilityDef` describes what a kind of facility makes and how much labor
//! it needs; a `Facility` is one placed instance on a map cell.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EconError, Result};
use crate::core::types::{CellId, FacilityId, FacilityTypeId, GoodId, LaborCategory};

/// Static definition of a facility type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityDef {
    pub id: FacilityTypeId,
    pub name: String,
    /// Extraction facilities pull raw goods out of the land; the rest run recipes
    pub extraction: bool,
    pub output: GoodId,
    pub labor_category: LaborCategory,
    /// Workers needed for full speed
    pub labor_required: u32,
    /// Output per day at full staffing (units for extraction, batches for processing)
    pub base_throughput: f64,
}

impl FacilityDef {
    /// Throughput for a given worker count
    ///
    /// Scales linearly with the staffing ratio and is capped at
    /// `base_throughput` at full staffing. Zero workers yields zero.
    pub fn throughput(&self, workers: u32) -> f64 {
        if self.labor_required == 0 || workers == 0 {
            return 0.0;
        }
        let staffing = (workers as f64 / self.labor_required as f64).min(1.0);
        self.base_throughput * staffing
    }

    pub fn validate(&self) -> Result<()> {
        if self.labor_required == 0 {
            return Err(EconError::InvalidDefinition {
                name: self.name.clone(),
                reason: "labor_required must be at least 1".into(),
            });
        }
        if self.base_throughput.is_nan() || self.base_throughput < 0.0 {
            return Err(EconError::InvalidDefinition {
                name: self.name.clone(),
                reason: format!("base_throughput {} must be non-negative", self.base_throughput),
            });
        }
        Ok(())
    }
}

/// Registry of facility types
#[derive(Debug, Clone, Default)]
pub struct FacilityRegistry {
    defs: BTreeMap<FacilityTypeId, FacilityDef>,
    by_name: AHashMap<String, FacilityTypeId>,
}

impl FacilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in facility types, matching `data/economy.toml`
    pub fn with_defaults() -> Self {
        use LaborCategory::*;

        let table: [(&str, bool, u16, LaborCategory, u32, f64); 15] = [
            ("farm", true, 0, Unskilled, 20, 400.0),
            ("mill", false, 1, Skilled, 4, 150.0),
            ("bakery", false, 2, Skilled, 4, 120.0),
            ("iron_mine", true, 3, Unskilled, 15, 60.0),
            ("smelter", false, 4, Skilled, 5, 20.0),
            ("smithy", false, 5, Skilled, 3, 5.0),
            ("lumber_camp", true, 6, Unskilled, 10, 80.0),
            ("sawmill", false, 7, Skilled, 4, 30.0),
            ("workshop", false, 8, Skilled, 3, 4.0),
            ("sheep_ranch", true, 9, Unskilled, 6, 40.0),
            ("weaver", false, 10, Skilled, 4, 20.0),
            ("tailor", false, 11, Skilled, 3, 15.0),
            ("fishery", true, 12, Unskilled, 10, 120.0),
            ("salt_works", true, 13, Unskilled, 5, 40.0),
            ("smokehouse", false, 14, Skilled, 3, 50.0),
        ];

        let mut registry = Self::new();
        for (idx, (name, extraction, output, category, labor, throughput)) in
            table.into_iter().enumerate()
        {
            let added = registry.add(FacilityDef {
                id: FacilityTypeId(idx as u16),
                name: name.into(),
                extraction,
                output: GoodId(output),
                labor_category: category,
                labor_required: labor,
                base_throughput: throughput,
            });
            debug_assert!(added.is_ok(), "built-in facility table is invalid: {:?}", added);
        }
        registry
    }

    pub fn add(&mut self, def: FacilityDef) -> Result<()> {
        def.validate()?;
        if self.defs.contains_key(&def.id) {
            return Err(EconError::Duplicate(def.id.to_string()));
        }
        if self.by_name.contains_key(&def.name) {
            return Err(EconError::Duplicate(def.name.clone()));
        }
        self.by_name.insert(def.name.clone(), def.id);
        self.defs.insert(def.id, def);
        Ok(())
    }

    pub fn get(&self, id: FacilityTypeId) -> Option<&FacilityDef> {
        self.defs.get(&id)
    }

    pub fn id_by_name(&self, name: &str) -> Option<FacilityTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityDef> {
        self.defs.values()
    }

    /// Facility types whose output is `good`
    pub fn producing(&self, good: GoodId) -> impl Iterator<Item = &FacilityDef> {
        self.defs.values().filter(move |d| d.output == good)
    }
}

/// A placed facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: FacilityId,
    pub type_id: FacilityTypeId,
    pub cell: CellId,
    /// Workers assigned this tick; reset at the start of every production phase
    pub assigned_workers: u32,
}

impl Facility {
    pub fn new(id: FacilityId, type_id: FacilityTypeId, cell: CellId) -> Self {
        Self {
            id,
            type_id,
            cell,
            assigned_workers: 0,
        }
    }

    pub fn is_staffed(&self) -> bool {
        self.assigned_workers > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mill() -> FacilityDef {
        FacilityDef {
            id: FacilityTypeId(1),
            name: "mill".into(),
            extraction: false,
            output: GoodId(1),
            labor_category: LaborCategory::Skilled,
            labor_required: 4,
            base_throughput: 10.0,
        }
    }

    #[test]
    fn test_throughput_scales_with_staffing() {
        let def = mill();
        assert_eq!(def.throughput(0), 0.0);
        assert!((def.throughput(1) - 2.5).abs() < 1e-9);
        assert!((def.throughput(2) - 5.0).abs() < 1e-9);
        assert!((def.throughput(4) - 10.0).abs() < 1e-9);
        // Capped at rated capacity
        assert!((def.throughput(12) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_throughput_is_monotonic() {
        let def = mill();
        let mut last = 0.0;
        for workers in 0..10 {
            let t = def.throughput(workers);
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn test_zero_labor_rejected() {
        let mut def = mill();
        def.labor_required = 0;
        assert!(matches!(
            FacilityRegistry::new().add(def),
            Err(EconError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FacilityRegistry::with_defaults();
        assert_eq!(registry.len(), 15);

        let farm = registry.get(registry.id_by_name("farm").unwrap()).unwrap();
        assert!(farm.extraction);
        assert_eq!(farm.output, GoodId(0));
        assert_eq!(farm.labor_category, LaborCategory::Unskilled);

        let bakers: Vec<_> = registry.producing(GoodId(2)).collect();
        assert_eq!(bakers.len(), 1);
        assert_eq!(bakers[0].name, "bakery");
    }

    #[test]
    fn test_new_facility_unstaffed() {
        let facility = Facility::new(FacilityId(1), FacilityTypeId(0), CellId(3));
        assert!(!facility.is_staffed());
    }
}
