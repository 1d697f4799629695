//! Day scheduler - advances the calendar and runs tick systems in order
//!
//! Systems run in registration order. Register production before
//! consumption so a day's output is available to that day's demand.

use crate::core::calendar::Calendar;
use crate::core::types::Day;
use crate::economy::state::EconomyState;
use crate::log::{EventLog, LogDomain, LogLevel};
use crate::map::MapData;
use crate::systems::TickSystem;

pub struct Scheduler {
    state: Option<EconomyState>,
    map: Box<dyn MapData>,
    systems: Vec<Box<dyn TickSystem>>,
    calendar: Calendar,
    log: EventLog,
    initialized: bool,
}

impl Scheduler {
    /// Scheduler with no economy attached; days advance but no system runs
    pub fn new(map: Box<dyn MapData>, log: EventLog) -> Self {
        Self {
            state: None,
            map,
            systems: Vec::new(),
            calendar: Calendar::new(),
            log,
            initialized: false,
        }
    }

    pub fn with_state(state: EconomyState, map: Box<dyn MapData>, log: EventLog) -> Self {
        let mut scheduler = Self::new(map, log);
        scheduler.state = Some(state);
        scheduler
    }

    /// Attach or replace the economy; systems re-initialize before the next tick
    pub fn set_state(&mut self, state: EconomyState) {
        self.state = Some(state);
        self.initialized = false;
    }

    pub fn take_state(&mut self) -> Option<EconomyState> {
        self.initialized = false;
        self.state.take()
    }

    pub fn state(&self) -> Option<&EconomyState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut EconomyState> {
        self.state.as_mut()
    }

    pub fn map(&self) -> &dyn MapData {
        self.map.as_ref()
    }

    pub fn add_system(&mut self, system: Box<dyn TickSystem>) {
        self.systems.push(system);
        self.initialized = false;
    }

    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn current_day(&self) -> Day {
        self.calendar.current_day()
    }

    /// Run every system's one-time setup
    ///
    /// Returns false when there is no economy to initialize against.
    pub fn initialize(&mut self) -> bool {
        let Some(state) = self.state.as_ref() else {
            self.log
                .warn(LogDomain::SIMULATION, "no economy state; systems not initialized");
            return false;
        };
        for system in &mut self.systems {
            system.initialize(state, self.map.as_ref());
        }
        self.initialized = true;
        true
    }

    /// Advance one day and run the systems due on it
    ///
    /// A missing economy state skips the systems without failing; the day
    /// still advances.
    pub fn run_day(&mut self) {
        self.calendar.advance();
        let day = self.calendar.current_day();

        if self.state.is_none() {
            self.log.emit(
                LogDomain::SIMULATION,
                LogLevel::Debug,
                format!("day {}: no economy state, skipping systems", day),
                None,
            );
            return;
        }
        if !self.initialized {
            self.initialize();
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };
        for system in &mut self.systems {
            let interval = system.tick_interval().max(1);
            if day % interval == 0 {
                system.tick(state, self.map.as_ref());
            }
        }
    }

    pub fn run_days(&mut self, days: u64) {
        for _ in 0..days {
            self.run_day();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::types::GoodId;
    use crate::map::CellCountyMap;

    /// Records (name, day-of-tick) into a shared trace
    struct Probe {
        name: &'static str,
        interval: u64,
        trace: Rc<RefCell<Vec<(&'static str, u64)>>>,
        initialized: bool,
        ticks: u64,
    }

    impl Probe {
        fn new(name: &'static str, interval: u64, trace: Rc<RefCell<Vec<(&'static str, u64)>>>) -> Self {
            Self {
                name,
                interval,
                trace,
                initialized: false,
                ticks: 0,
            }
        }
    }

    impl TickSystem for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn tick_interval(&self) -> u64 {
            self.interval
        }

        fn initialize(&mut self, _state: &EconomyState, _map: &dyn MapData) {
            self.initialized = true;
        }

        fn tick(&mut self, state: &mut EconomyState, _map: &dyn MapData) {
            assert!(self.initialized, "tick before initialize");
            self.ticks += 1;
            state.ledger.record_produced(GoodId(0), 1.0);
            self.trace.borrow_mut().push((self.name, self.ticks));
        }
    }

    fn scheduler_with_state() -> Scheduler {
        Scheduler::with_state(
            EconomyState::with_defaults(),
            Box::new(CellCountyMap::new()),
            EventLog::new(),
        )
    }

    #[test]
    fn test_systems_run_in_registration_order() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = scheduler_with_state();
        scheduler.add_system(Box::new(Probe::new("first", 1, trace.clone())));
        scheduler.add_system(Box::new(Probe::new("second", 1, trace.clone())));

        scheduler.run_days(2);

        assert_eq!(
            *trace.borrow(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
        assert_eq!(scheduler.system_names(), vec!["first", "second"]);
    }

    #[test]
    fn test_tick_interval_respected() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = scheduler_with_state();
        scheduler.add_system(Box::new(Probe::new("weekly", 7, trace.clone())));

        scheduler.run_days(20);

        // Days 7 and 14
        assert_eq!(trace.borrow().len(), 2);
        assert_eq!(scheduler.current_day(), 20);
    }

    #[test]
    fn test_missing_state_skips_systems() {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = Scheduler::new(Box::new(CellCountyMap::new()), EventLog::new());
        scheduler.add_system(Box::new(Probe::new("daily", 1, trace.clone())));

        scheduler.run_days(3);
        assert!(trace.borrow().is_empty());
        assert_eq!(scheduler.current_day(), 3);
        assert!(!scheduler.initialize());

        scheduler.set_state(EconomyState::with_defaults());
        scheduler.run_day();
        assert_eq!(trace.borrow().len(), 1);
    }
}
