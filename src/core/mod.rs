pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{Calendar, CalendarDate};
pub use config::EconomyConfig;
pub use error::{EconError, Result};
