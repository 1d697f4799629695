//! Seeded demo world generation
//!
//! Builds counties, their cells, populations, resource abundances, and a
//! facility layout over any goods/facility definitions. The same seed always
//! yields the same world.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::EconomyConfig;
use crate::core::types::{CellId, CountyId, FacilityTypeId};
use crate::economy::county::CountyEconomy;
use crate::economy::loader::EconomyDefs;
use crate::economy::state::EconomyState;
use crate::map::CellCountyMap;

/// Configuration for world generation
#[derive(Clone, Debug)]
pub struct WorldGenConfig {
    pub counties: u32,
    pub cells_per_county: u32,
    pub min_population: u32,
    pub max_population: u32,
    /// Chance a county has any of a given raw resource
    pub resource_chance: f64,
    /// Abundance range for resources that are present
    pub min_abundance: f64,
    pub max_abundance: f64,
    /// Chance a county gets each processing facility type
    pub processing_chance: f64,
    /// Days of consumer demand placed in each stockpile at start
    pub starting_stock_days: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            counties: 12,
            cells_per_county: 16,
            min_population: 400,
            max_population: 2_500,
            resource_chance: 0.7,
            min_abundance: 0.5,
            max_abundance: 1.5,
            processing_chance: 0.8,
            starting_stock_days: 10.0,
        }
    }
}

/// Generate a world: the economy state plus its cell → county map
pub fn generate_world(
    config: &WorldGenConfig,
    defs: EconomyDefs,
    economy: &EconomyConfig,
    mut rng: ChaCha8Rng,
) -> (EconomyState, CellCountyMap) {
    let mut state = defs.into_state();
    let mut map = CellCountyMap::new();
    let cells_per_county = config.cells_per_county.max(1);

    // Raw goods are the outputs of extraction facilities, in type id order
    let raw_goods: Vec<_> = state
        .facility_types
        .iter()
        .filter(|def| def.extraction)
        .map(|def| def.output)
        .collect();

    for index in 0..config.counties {
        let county_id = CountyId(index);
        let cells: Vec<CellId> = (0..cells_per_county)
            .map(|k| CellId(index * cells_per_county + k))
            .collect();
        for cell in &cells {
            map.assign(*cell, county_id);
        }

        let population = if config.max_population > config.min_population {
            rng.gen_range(config.min_population..=config.max_population)
        } else {
            config.min_population
        };
        let mut county = CountyEconomy::with_population(county_id, population, economy);

        for good in &raw_goods {
            if county.resource_abundance(*good) > 0.0 {
                continue;
            }
            if rng.gen::<f64>() < config.resource_chance {
                let abundance = if config.max_abundance > config.min_abundance {
                    rng.gen_range(config.min_abundance..config.max_abundance)
                } else {
                    config.min_abundance
                };
                county.set_resource_abundance(*good, abundance);
            }
        }

        for good in state.goods.consumer_goods() {
            let stock = population as f64 * good.base_consumption * config.starting_stock_days;
            county.stockpile.add(good.id, stock);
        }

        let placements = facility_layout(&state, &county, config, &mut rng);
        state.insert_county(county);
        for type_id in placements {
            let cell = cells[rng.gen_range(0..cells.len())];
            state.spawn_facility(type_id, cell);
        }
    }

    (state, map)
}

fn facility_layout(
    state: &EconomyState,
    county: &CountyEconomy,
    config: &WorldGenConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<FacilityTypeId> {
    let mut placements = Vec::new();
    for def in state.facility_types.iter() {
        if def.extraction {
            // Bigger counties work more of their land
            if county.resource_abundance(def.output) > 0.0 {
                let count = 1 + county.population() / 1_000;
                placements.extend(std::iter::repeat(def.id).take(count as usize));
            }
        } else if rng.gen::<f64>() < config.processing_chance {
            placements.push(def.id);
        }
    }
    placements
}
