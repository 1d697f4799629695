//! County Economy - daily production and consumption for a county-based world
//!
//! Goods flow from extraction facilities through processing chains into
//! county stockpiles, and populations draw consumer goods back out. The
//! [`systems::Scheduler`] advances the calendar one day at a time and runs
//! the tick systems in order.

pub mod core;
pub mod economy;
pub mod log;
pub mod map;
pub mod report;
pub mod systems;
pub mod worldgen;
