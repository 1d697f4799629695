//! Production system - runs extraction and processing once per day
//!
//! Each tick runs three phases in strict order:
//! 1. Reset: every county's labor pool returns to full availability and every
//!    facility loses its assigned workers
//! 2. Extraction: facilities pull raw goods scaled by county abundance
//! 3. Processing: facilities turn recipe inputs into whole output batches
//!
//! Processing runs after all extraction, so goods extracted this tick can be
//! refined this tick. Within a phase facilities are visited in ascending id
//! order; when labor or inputs are scarce, lower ids are served first.

use std::collections::BTreeMap;

use crate::core::config::EconomyConfig;
use crate::core::types::{CountyId, FacilityId, GoodId};
use crate::economy::county::CountyEconomy;
use crate::economy::facility::{Facility, FacilityDef};
use crate::economy::goods::GoodsCatalog;
use crate::economy::labor::LaborPool;
use crate::economy::state::{sum_amounts, DailyLedger, EconomyParts, EconomyState};
use crate::log::{EventLog, LogDomain, LogLevel};
use crate::map::MapData;
use crate::systems::TickSystem;

/// One-time facility counts taken at initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FacilityCensus {
    pub extraction: u32,
    pub processing: u32,
    /// Facilities whose type is not in the registry
    pub unresolved_type: u32,
    /// Facilities on a cell that maps to no known county
    pub unmapped: u32,
}

/// What happened to one facility this tick
#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Produced { good: GoodId, amount: f64 },
    Idle,
    Unresolved,
}

pub struct ProductionSystem {
    log: EventLog,
    summary_interval: u64,
    days: u64,
    census: Option<FacilityCensus>,
    period_output: BTreeMap<GoodId, f64>,
}

impl ProductionSystem {
    pub fn new(log: EventLog, config: &EconomyConfig) -> Self {
        Self {
            log,
            summary_interval: config.summary_interval_days.max(1),
            days: 0,
            census: None,
            period_output: BTreeMap::new(),
        }
    }

    pub fn census(&self) -> Option<FacilityCensus> {
        self.census
    }

    /// Days ticked so far
    pub fn days(&self) -> u64 {
        self.days
    }

    fn emit_summary(&mut self, state: &EconomyState) {
        let total = sum_amounts(self.period_output.values());
        let breakdown = self
            .period_output
            .iter()
            .map(|(good, amount)| format!("{}={:.1}", state.goods.name_of(*good), amount))
            .collect::<Vec<_>>()
            .join(", ");
        self.log.emit(
            LogDomain::PRODUCTION,
            LogLevel::Info,
            format!(
                "day {}: produced {:.1} units over {} days; {} active, {} idle, {} unresolved facilities today",
                self.days,
                total,
                self.summary_interval,
                state.ledger.active_facilities,
                state.ledger.idle_facilities,
                state.ledger.unresolved_facilities,
            ),
            Some(breakdown),
        );
        self.period_output.clear();
    }
}

impl TickSystem for ProductionSystem {
    fn name(&self) -> &'static str {
        "production"
    }

    fn initialize(&mut self, state: &EconomyState, map: &dyn MapData) {
        let mut census = FacilityCensus::default();
        for facility in state.facilities() {
            match state.facility_types.get(facility.type_id) {
                Some(def) if def.extraction => census.extraction += 1,
                Some(_) => census.processing += 1,
                None => census.unresolved_type += 1,
            }
            let mapped = map
                .county_of(facility.cell)
                .and_then(|county| state.county(county))
                .is_some();
            if !mapped {
                census.unmapped += 1;
            }
        }

        self.log.info(
            LogDomain::PRODUCTION,
            format!(
                "{} extraction and {} processing facilities across {} counties",
                census.extraction,
                census.processing,
                state.county_count()
            ),
        );
        if census.unresolved_type > 0 || census.unmapped > 0 {
            self.log.warn(
                LogDomain::PRODUCTION,
                format!(
                    "{} facilities with unknown type and {} outside any county will produce nothing",
                    census.unresolved_type, census.unmapped
                ),
            );
        }
        self.census = Some(census);
    }

    fn tick(&mut self, state: &mut EconomyState, map: &dyn MapData) {
        self.days += 1;

        {
            let mut parts = state.parts_mut();
            reset_phase(&mut parts);
            extraction_phase(&mut parts, map, &self.log);
            processing_phase(&mut parts, map, &self.log);
        }

        for (good, amount) in &state.ledger.produced {
            *self.period_output.entry(*good).or_insert(0.0) += amount;
        }

        if self.days % self.summary_interval == 0 {
            self.emit_summary(state);
        }
    }
}

/// Phase 1: full labor availability, no facility staffed
fn reset_phase(parts: &mut EconomyParts<'_>) {
    parts.ledger.clear_production();
    for county in parts.counties.values_mut() {
        county.labor.reset();
    }
    for facility in parts.facilities.values_mut() {
        facility.assigned_workers = 0;
    }
}

/// Phase 2: extraction facilities, ascending id
fn extraction_phase(parts: &mut EconomyParts<'_>, map: &dyn MapData, log: &EventLog) {
    let goods = parts.goods;
    let types = parts.facility_types;
    for facility in parts.facilities.values_mut() {
        let Some(def) = types.get(facility.type_id) else {
            record(parts.ledger, log, facility.id, Outcome::Unresolved);
            continue;
        };
        if !def.extraction {
            continue;
        }

        let outcome = extract(facility, def, goods, parts.counties, map);
        record(parts.ledger, log, facility.id, outcome);
    }
}

/// Phase 3: processing facilities, ascending id
fn processing_phase(parts: &mut EconomyParts<'_>, map: &dyn MapData, log: &EventLog) {
    let goods = parts.goods;
    let types = parts.facility_types;
    for facility in parts.facilities.values_mut() {
        // Unresolved types were already counted during extraction
        let Some(def) = types.get(facility.type_id) else {
            continue;
        };
        if def.extraction {
            continue;
        }

        let outcome = process(facility, def, goods, parts.counties, parts.ledger, map);
        record(parts.ledger, log, facility.id, outcome);
    }
}

fn extract(
    facility: &mut Facility,
    def: &FacilityDef,
    goods: &GoodsCatalog,
    counties: &mut BTreeMap<CountyId, CountyEconomy>,
    map: &dyn MapData,
) -> Outcome {
    let Some(county_id) = map.county_of(facility.cell) else {
        return Outcome::Unresolved;
    };
    let Some(county) = counties.get_mut(&county_id) else {
        return Outcome::Unresolved;
    };
    let Some(good) = goods.get(def.output) else {
        return Outcome::Unresolved;
    };

    let abundance = county.resource_abundance(good.id);
    if abundance <= 0.0 {
        return Outcome::Idle;
    }

    let workers = allocate_workers(facility, def, &mut county.labor);
    if workers == 0 {
        return Outcome::Idle;
    }

    let produced = def.throughput(workers) * abundance;
    let added = county.stockpile.add(good.id, produced);
    if added > 0.0 {
        Outcome::Produced {
            good: good.id,
            amount: added,
        }
    } else {
        Outcome::Idle
    }
}

fn process(
    facility: &mut Facility,
    def: &FacilityDef,
    goods: &GoodsCatalog,
    counties: &mut BTreeMap<CountyId, CountyEconomy>,
    ledger: &mut DailyLedger,
    map: &dyn MapData,
) -> Outcome {
    let Some(county_id) = map.county_of(facility.cell) else {
        return Outcome::Unresolved;
    };
    let Some(county) = counties.get_mut(&county_id) else {
        return Outcome::Unresolved;
    };
    let Some(good) = goods.get(def.output) else {
        return Outcome::Unresolved;
    };
    if !good.has_recipe() {
        return Outcome::Idle;
    }
    // Recipes built in code may skip catalog validation
    let recipe_ok = good.recipe.iter().all(|input| {
        goods.get(input.good).is_some() && input.quantity > 0.0
    });
    if !recipe_ok {
        return Outcome::Unresolved;
    }

    let workers = allocate_workers(facility, def, &mut county.labor);
    if workers == 0 {
        return Outcome::Idle;
    }

    // Batches are whole: floor() truncates toward zero for these non-negative values
    let max_batches = def.throughput(workers).floor();
    let batches = good.recipe.iter().fold(max_batches, |batches, input| {
        let affordable = (county.stockpile.get(input.good) / input.quantity).floor();
        batches.min(affordable)
    });
    // Never consume inputs for output the stockpile can't hold
    let batches = match county.stockpile.capacity(good.id) {
        Some(cap) => batches.min((cap - county.stockpile.get(good.id)).max(0.0).floor()),
        None => batches,
    };
    if batches <= 0.0 {
        return Outcome::Idle;
    }

    for input in &good.recipe {
        let used = county.stockpile.remove(input.good, input.quantity * batches);
        ledger.record_input_used(input.good, used);
    }
    let added = county.stockpile.add(good.id, batches);

    Outcome::Produced {
        good: good.id,
        amount: added,
    }
}

/// Request the facility's full crew; it keeps whatever the pool grants
fn allocate_workers(facility: &mut Facility, def: &FacilityDef, labor: &mut LaborPool) -> u32 {
    let granted = labor.allocate(def.labor_category, def.labor_required);
    facility.assigned_workers = granted;
    granted
}

fn record(
    ledger: &mut DailyLedger,
    log: &EventLog,
    facility: FacilityId,
    outcome: Outcome,
) {
    match outcome {
        Outcome::Produced { good, amount } => {
            ledger.active_facilities += 1;
            ledger.record_produced(good, amount);
        }
        Outcome::Idle => ledger.idle_facilities += 1,
        Outcome::Unresolved => {
            ledger.unresolved_facilities += 1;
            if log.enabled(LogDomain::PRODUCTION, LogLevel::Debug) {
                log.emit(
                    LogDomain::PRODUCTION,
                    LogLevel::Debug,
                    "facility skipped: unresolved type, good, or county",
                    Some(facility.to_string()),
                );
            }
        }
    }
}
