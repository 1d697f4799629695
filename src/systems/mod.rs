//! Tick systems and the day scheduler

pub mod consumption;
pub mod production;
pub mod scheduler;

pub use consumption::{ConsumptionSystem, PopulationCensus};
pub use production::{FacilityCensus, ProductionSystem};
pub use scheduler::Scheduler;

use crate::economy::state::EconomyState;
use crate::map::MapData;

/// A system the scheduler runs once every `tick_interval` days
pub trait TickSystem {
    fn name(&self) -> &'static str;

    /// Days between invocations
    fn tick_interval(&self) -> u64 {
        1
    }

    /// One-time setup before the first tick; must not mutate the economy
    fn initialize(&mut self, state: &EconomyState, map: &dyn MapData);

    fn tick(&mut self, state: &mut EconomyState, map: &dyn MapData);
}
