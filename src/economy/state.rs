//! Economy state - the single mutable root the tick systems operate on

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{CellId, CountyId, FacilityId, FacilityTypeId, GoodId};
use crate::economy::county::CountyEconomy;
use crate::economy::facility::{Facility, FacilityRegistry};
use crate::economy::goods::GoodsCatalog;

/// Sum of quantities, 0.0 (never -0.0) when empty
pub fn sum_amounts<'a>(amounts: impl IntoIterator<Item = &'a f64>) -> f64 {
    amounts.into_iter().fold(0.0, |total, amount| total + amount)
}

/// Per-good totals for the current day
///
/// The production side is cleared at the start of each production tick and
/// the consumption side at the start of each consumption tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLedger {
    pub produced: BTreeMap<GoodId, f64>,
    /// Inputs used up by processing
    pub inputs_used: BTreeMap<GoodId, f64>,
    pub consumed: BTreeMap<GoodId, f64>,
    pub unmet: BTreeMap<GoodId, f64>,
    /// Facilities that produced something today
    pub active_facilities: u32,
    /// Facilities that resolved but produced nothing (no workers, inputs, or abundance)
    pub idle_facilities: u32,
    /// Facilities skipped for unresolved type, good, or county
    pub unresolved_facilities: u32,
}

impl DailyLedger {
    pub fn clear_production(&mut self) {
        self.produced.clear();
        self.inputs_used.clear();
        self.active_facilities = 0;
        self.idle_facilities = 0;
        self.unresolved_facilities = 0;
    }

    pub fn clear_consumption(&mut self) {
        self.consumed.clear();
        self.unmet.clear();
    }

    pub fn record_produced(&mut self, good: GoodId, amount: f64) {
        *self.produced.entry(good).or_insert(0.0) += amount;
    }

    pub fn record_input_used(&mut self, good: GoodId, amount: f64) {
        *self.inputs_used.entry(good).or_insert(0.0) += amount;
    }

    pub fn record_consumed(&mut self, good: GoodId, amount: f64) {
        *self.consumed.entry(good).or_insert(0.0) += amount;
    }

    pub fn record_unmet(&mut self, good: GoodId, amount: f64) {
        *self.unmet.entry(good).or_insert(0.0) += amount;
    }

    pub fn total_produced(&self) -> f64 {
        sum_amounts(self.produced.values())
    }

    pub fn total_consumed(&self) -> f64 {
        sum_amounts(self.consumed.values())
    }

    pub fn total_unmet(&self) -> f64 {
        sum_amounts(self.unmet.values())
    }
}

/// Aggregate root: catalogs, facilities, and counties
///
/// Facilities and counties live in ordered maps so every pass visits them in
/// ascending id order regardless of insertion history.
#[derive(Debug, Clone, Default)]
pub struct EconomyState {
    pub goods: GoodsCatalog,
    pub facility_types: FacilityRegistry,
    facilities: BTreeMap<FacilityId, Facility>,
    counties: BTreeMap<CountyId, CountyEconomy>,
    pub ledger: DailyLedger,
    next_facility_id: u32,
}

/// Disjoint borrows of an `EconomyState` for one phase
///
/// Catalogs are shared, entity collections are exclusive.
pub struct EconomyParts<'a> {
    pub goods: &'a GoodsCatalog,
    pub facility_types: &'a FacilityRegistry,
    pub facilities: &'a mut BTreeMap<FacilityId, Facility>,
    pub counties: &'a mut BTreeMap<CountyId, CountyEconomy>,
    pub ledger: &'a mut DailyLedger,
}

impl EconomyState {
    pub fn new(goods: GoodsCatalog, facility_types: FacilityRegistry) -> Self {
        Self {
            goods,
            facility_types,
            ..Self::default()
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(GoodsCatalog::with_defaults(), FacilityRegistry::with_defaults())
    }

    pub fn parts_mut(&mut self) -> EconomyParts<'_> {
        EconomyParts {
            goods: &self.goods,
            facility_types: &self.facility_types,
            facilities: &mut self.facilities,
            counties: &mut self.counties,
            ledger: &mut self.ledger,
        }
    }

    /// Insert or replace a county
    pub fn insert_county(&mut self, county: CountyEconomy) {
        self.counties.insert(county.id, county);
    }

    pub fn county(&self, id: CountyId) -> Option<&CountyEconomy> {
        self.counties.get(&id)
    }

    pub fn county_mut(&mut self, id: CountyId) -> Option<&mut CountyEconomy> {
        self.counties.get_mut(&id)
    }

    pub fn counties(&self) -> impl Iterator<Item = &CountyEconomy> {
        self.counties.values()
    }

    pub fn county_count(&self) -> usize {
        self.counties.len()
    }

    /// Place a facility with the next free id
    pub fn spawn_facility(&mut self, type_id: FacilityTypeId, cell: CellId) -> FacilityId {
        let id = FacilityId(self.next_facility_id);
        self.insert_facility(Facility::new(id, type_id, cell));
        id
    }

    /// Insert or replace a facility under its own id
    pub fn insert_facility(&mut self, facility: Facility) {
        self.next_facility_id = self.next_facility_id.max(facility.id.0.saturating_add(1));
        self.facilities.insert(facility.id, facility);
    }

    pub fn facility(&self, id: FacilityId) -> Option<&Facility> {
        self.facilities.get(&id)
    }

    pub fn facilities(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.values()
    }

    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    pub fn total_population(&self) -> u64 {
        self.counties.values().map(|c| c.population() as u64).sum()
    }
}
