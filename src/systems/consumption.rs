//! Consumption system - populations draw consumer goods from their county stockpile
//!
//! Demand per good is `population * base_consumption`. Whatever the stockpile
//! can't cover is recorded as unmet demand on the county; a county's unmet
//! demand always describes the latest tick only.

use std::collections::BTreeMap;

use crate::core::config::EconomyConfig;
use crate::core::types::{CountyId, GoodId};
use crate::economy::state::{sum_amounts, EconomyState};
use crate::log::{EventLog, LogDomain, LogLevel};
use crate::map::MapData;
use crate::systems::TickSystem;

/// Population counts taken at initialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationCensus {
    pub counties: u32,
    /// Counties with at least one person
    pub populated: u32,
    pub total_population: u64,
    /// Consumer goods no facility type produces
    pub unproduced_goods: u32,
}

pub struct ConsumptionSystem {
    log: EventLog,
    summary_interval: u64,
    days: u64,
    census: Option<PopulationCensus>,
    period_consumed: BTreeMap<GoodId, f64>,
    period_unmet: BTreeMap<GoodId, f64>,
}

impl ConsumptionSystem {
    pub fn new(log: EventLog, config: &EconomyConfig) -> Self {
        Self {
            log,
            summary_interval: config.summary_interval_days.max(1),
            days: 0,
            census: None,
            period_consumed: BTreeMap::new(),
            period_unmet: BTreeMap::new(),
        }
    }

    pub fn census(&self) -> Option<PopulationCensus> {
        self.census
    }

    pub fn days(&self) -> u64 {
        self.days
    }

    fn emit_summary(&mut self, state: &EconomyState) {
        let consumed = sum_amounts(self.period_consumed.values());
        let unmet = sum_amounts(self.period_unmet.values());
        let starving = starving_counties(state);

        let shortages = self
            .period_unmet
            .iter()
            .map(|(good, amount)| format!("{}={:.1}", state.goods.name_of(*good), amount))
            .collect::<Vec<_>>()
            .join(", ");

        self.log.emit(
            LogDomain::CONSUMPTION,
            LogLevel::Info,
            format!(
                "day {}: consumed {:.1} units over {} days, {:.1} unmet; {} counties short of staples today",
                self.days,
                consumed,
                self.summary_interval,
                unmet,
                starving.len(),
            ),
            if shortages.is_empty() { None } else { Some(shortages) },
        );
        self.period_consumed.clear();
        self.period_unmet.clear();
    }
}

impl TickSystem for ConsumptionSystem {
    fn name(&self) -> &'static str {
        "consumption"
    }

    fn initialize(&mut self, state: &EconomyState, _map: &dyn MapData) {
        let unproduced: Vec<&str> = state
            .goods
            .consumer_goods()
            .filter(|good| state.facility_types.producing(good.id).next().is_none())
            .map(|good| good.name.as_str())
            .collect();
        let census = PopulationCensus {
            counties: state.county_count() as u32,
            populated: state.counties().filter(|c| c.population() > 0).count() as u32,
            total_population: state.total_population(),
            unproduced_goods: unproduced.len() as u32,
        };
        self.log.info(
            LogDomain::POPULATION,
            format!(
                "{} people in {} of {} counties",
                census.total_population, census.populated, census.counties
            ),
        );
        if state.goods.consumer_goods().next().is_none() {
            self.log
                .warn(LogDomain::CONSUMPTION, "no consumer goods defined; nothing will be consumed");
        }
        if !unproduced.is_empty() {
            self.log.emit(
                LogDomain::CONSUMPTION,
                LogLevel::Warn,
                format!("{} consumer goods have no producing facility type", unproduced.len()),
                Some(unproduced.join(", ")),
            );
        }
        self.census = Some(census);
    }

    fn tick(&mut self, state: &mut EconomyState, _map: &dyn MapData) {
        self.days += 1;

        {
            let parts = state.parts_mut();
            parts.ledger.clear_consumption();

            for county in parts.counties.values_mut() {
                county.clear_unmet_demand();
                let population = county.population();
                if population == 0 {
                    continue;
                }

                for good in parts.goods.consumer_goods() {
                    let demand = population as f64 * good.base_consumption;
                    if demand <= 0.0 {
                        continue;
                    }
                    let consumed = county.stockpile.remove(good.id, demand);
                    parts.ledger.record_consumed(good.id, consumed);

                    let unmet = demand - consumed;
                    if unmet > 0.0 {
                        county.record_unmet_demand(good.id, unmet);
                        parts.ledger.record_unmet(good.id, unmet);
                    }
                }

                if !county.unmet_demand().is_empty()
                    && self.log.enabled(LogDomain::CONSUMPTION, LogLevel::Debug)
                {
                    self.log.emit(
                        LogDomain::CONSUMPTION,
                        LogLevel::Debug,
                        format!("{} short on {} goods", county.id, county.unmet_demand().len()),
                        None,
                    );
                }
            }
        }

        for (good, amount) in &state.ledger.consumed {
            *self.period_consumed.entry(*good).or_insert(0.0) += amount;
        }
        for (good, amount) in &state.ledger.unmet {
            *self.period_unmet.entry(*good).or_insert(0.0) += amount;
        }

        if self.days % self.summary_interval == 0 {
            self.emit_summary(state);
        }
    }
}

/// Counties with unmet demand for at least one staple good, ascending id
pub fn starving_counties(state: &EconomyState) -> Vec<CountyId> {
    state
        .counties()
        .filter(|county| {
            county.unmet_demand().keys().any(|good| {
                state.goods.get(*good).map(|def| def.staple).unwrap_or(false)
            })
        })
        .map(|county| county.id)
        .collect()
}
