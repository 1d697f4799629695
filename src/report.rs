//! Economy report and serialization
//!
//! A report is a read-only snapshot of the economy after a run: per-good
//! flows, county health, and how well each facility type is staffed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::calendar::{Calendar, CalendarDate};
use crate::core::error::Result;
use crate::core::types::{CountyId, Day, FacilityTypeId, GoodId};
use crate::economy::county::CountyEconomy;
use crate::economy::state::{sum_amounts, EconomyState};

/// Complete end-of-run output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomyReport {
    pub day: Day,
    pub date: CalendarDate,
    pub totals: EconomyTotals,
    pub goods: Vec<GoodReport>,
    pub counties: CountyHealthReport,
    pub facilities: Vec<FacilityTypeReport>,
    /// Periodic snapshots taken during the run, oldest first
    pub timeline: Vec<DaySnapshot>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyTotals {
    pub counties: u32,
    pub population: u64,
    pub facilities: u32,
    pub produced: f64,
    pub consumed: f64,
    pub unmet: f64,
    pub stock: f64,
}

/// Flows for one good on the latest day, plus stock held across all counties
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoodReport {
    pub id: GoodId,
    pub name: String,
    pub produced: f64,
    pub inputs_used: f64,
    pub consumed: f64,
    pub unmet: f64,
    pub stock: f64,
}

impl GoodReport {
    /// Production left over after consumption and use as an input
    pub fn surplus(&self) -> f64 {
        self.produced - self.consumed - self.inputs_used
    }
}

/// How a county fared on its latest consumption tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountyHealth {
    /// Every demand met
    Surplus,
    /// Short on some consumer good, but no staple
    Deficit,
    /// Short on at least one staple good
    Starving,
}

impl CountyHealth {
    pub fn classify(county: &CountyEconomy, state: &EconomyState) -> Self {
        let unmet = county.unmet_demand();
        if unmet.is_empty() {
            return CountyHealth::Surplus;
        }
        let staple_short = unmet
            .keys()
            .any(|good| state.goods.get(*good).map(|def| def.staple).unwrap_or(false));
        if staple_short {
            CountyHealth::Starving
        } else {
            CountyHealth::Deficit
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CountyHealthReport {
    pub surplus: Vec<CountyId>,
    pub deficit: Vec<CountyId>,
    pub starving: Vec<CountyId>,
}

impl CountyHealthReport {
    pub fn from_state(state: &EconomyState) -> Self {
        let mut report = Self::default();
        for county in state.counties() {
            match CountyHealth::classify(county, state) {
                CountyHealth::Surplus => report.surplus.push(county.id),
                CountyHealth::Deficit => report.deficit.push(county.id),
                CountyHealth::Starving => report.starving.push(county.id),
            }
        }
        report
    }
}

/// Staffing metrics for one facility type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacilityTypeReport {
    pub id: FacilityTypeId,
    pub name: String,
    pub count: u32,
    /// Facilities with at least one assigned worker
    pub staffed: u32,
    pub workers: u64,
    pub labor_required: u64,
    /// `workers / labor_required`, 0.0 when none are placed
    pub labor_fill: f64,
}

/// Small per-day record for the timeline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub day: Day,
    pub population: u64,
    pub produced: f64,
    pub consumed: f64,
    pub unmet: f64,
    pub surplus_counties: u32,
    pub deficit_counties: u32,
    pub starving_counties: u32,
}

impl DaySnapshot {
    pub fn capture(state: &EconomyState, day: Day) -> Self {
        let health = CountyHealthReport::from_state(state);
        Self {
            day,
            population: state.total_population(),
            produced: state.ledger.total_produced(),
            consumed: state.ledger.total_consumed(),
            unmet: state.ledger.total_unmet(),
            surplus_counties: health.surplus.len() as u32,
            deficit_counties: health.deficit.len() as u32,
            starving_counties: health.starving.len() as u32,
        }
    }
}

impl EconomyReport {
    pub fn new(state: &EconomyState, calendar: &Calendar, timeline: Vec<DaySnapshot>) -> Self {
        let mut stock: BTreeMap<GoodId, f64> = BTreeMap::new();
        for county in state.counties() {
            for (good, amount) in county.stockpile.entries() {
                *stock.entry(good).or_insert(0.0) += amount;
            }
        }

        let ledger = &state.ledger;
        let amount = |map: &BTreeMap<GoodId, f64>, good: GoodId| map.get(&good).copied().unwrap_or(0.0);
        let goods: Vec<GoodReport> = state
            .goods
            .iter()
            .map(|def| GoodReport {
                id: def.id,
                name: def.name.clone(),
                produced: amount(&ledger.produced, def.id),
                inputs_used: amount(&ledger.inputs_used, def.id),
                consumed: amount(&ledger.consumed, def.id),
                unmet: amount(&ledger.unmet, def.id),
                stock: amount(&stock, def.id),
            })
            .collect();

        let facilities = facility_metrics(state);

        Self {
            day: calendar.current_day(),
            date: calendar.date(),
            totals: EconomyTotals {
                counties: state.county_count() as u32,
                population: state.total_population(),
                facilities: state.facility_count() as u32,
                produced: ledger.total_produced(),
                consumed: ledger.total_consumed(),
                unmet: ledger.total_unmet(),
                stock: sum_amounts(stock.values()),
            },
            goods,
            counties: CountyHealthReport::from_state(state),
            facilities,
            timeline,
        }
    }

    pub fn good(&self, name: &str) -> Option<&GoodReport> {
        self.goods.iter().find(|g| g.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "Day {} (year {}, month {}): {} people in {} counties\n\
             produced {:.1}, consumed {:.1}, unmet {:.1}, in stock {:.1}\n\
             {} surplus, {} deficit, {} starving counties",
            self.day,
            self.date.year,
            self.date.month,
            self.totals.population,
            self.totals.counties,
            self.totals.produced,
            self.totals.consumed,
            self.totals.unmet,
            self.totals.stock,
            self.counties.surplus.len(),
            self.counties.deficit.len(),
            self.counties.starving.len(),
        )
    }
}

fn facility_metrics(state: &EconomyState) -> Vec<FacilityTypeReport> {
    let mut reports: BTreeMap<FacilityTypeId, FacilityTypeReport> = state
        .facility_types
        .iter()
        .map(|def| {
            (
                def.id,
                FacilityTypeReport {
                    id: def.id,
                    name: def.name.clone(),
                    count: 0,
                    staffed: 0,
                    workers: 0,
                    labor_required: 0,
                    labor_fill: 0.0,
                },
            )
        })
        .collect();

    for facility in state.facilities() {
        let Some(def) = state.facility_types.get(facility.type_id) else {
            continue;
        };
        if let Some(report) = reports.get_mut(&def.id) {
            report.count += 1;
            if facility.is_staffed() {
                report.staffed += 1;
            }
            report.workers += facility.assigned_workers as u64;
            report.labor_required += def.labor_required as u64;
        }
    }

    reports
        .into_values()
        .map(|mut report| {
            if report.labor_required > 0 {
                report.labor_fill = report.workers as f64 / report.labor_required as f64;
            }
            report
        })
        .collect()
}
