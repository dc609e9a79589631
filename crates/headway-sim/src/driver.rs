//! Drivers and the per-candidate driver arena.

use std::fmt;

use headway_core::{BusId, ClockTime, DriverId, Weekday};

// ── ContractType ──────────────────────────────────────────────────────────────

/// Employment contract, which fixes the weekly rotation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContractType {
    /// Five consecutive days starting at the first day.
    A,
    /// Two days: the first day and the first day + 5.
    B,
}

impl ContractType {
    /// Contracted hour budget.  Carried for reporting; the dispatcher does not
    /// enforce it.
    pub const fn hour_budget(self) -> u32 {
        match self {
            ContractType::A => 8,
            ContractType::B => 21,
        }
    }

    /// Does a driver on this contract whose week starts at `first_day` work
    /// on `day`?
    pub const fn works_on(self, first_day: Weekday, day: Weekday) -> bool {
        let offset = first_day.days_until(day);
        match self {
            ContractType::A => offset < 5,
            ContractType::B => offset == 0 || offset == 5,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractType::A => f.write_str("A"),
            ContractType::B => f.write_str("B"),
        }
    }
}

// ── DriverDayState ────────────────────────────────────────────────────────────

/// Mutable simulation state, reset at the start of every simulated day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverDayState {
    /// Routes completed (dispatched) today.  Only increases within a day.
    pub route_count:    u32,
    /// When the driver may next be dispatched or leaves its current queue.
    pub next_available: ClockTime,
    /// Bus currently driven; `Some` only while the driver is busy.
    pub current_bus:    Option<BusId>,
    /// First dispatch of the day, set at most once.
    pub start_time:     Option<ClockTime>,
}

impl DriverDayState {
    pub fn new(day_start: ClockTime) -> Self {
        Self {
            route_count:    0,
            next_available: day_start,
            current_bus:    None,
            start_time:     None,
        }
    }

    pub fn reset(&mut self, day_start: ClockTime) {
        *self = Self::new(day_start);
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Driver {
    pub id:          DriverId,
    pub contract:    ContractType,
    pub first_day:   Weekday,
    pub hour_budget: u32,
    pub state:       DriverDayState,
}

impl Driver {
    pub fn new(id: DriverId, contract: ContractType, first_day: Weekday) -> Self {
        Self {
            id,
            contract,
            first_day,
            hour_budget: contract.hour_budget(),
            state: DriverDayState::new(ClockTime::MIDNIGHT),
        }
    }

    /// Weekly roster filter for a single driver.
    #[inline]
    pub fn works_on(&self, day: Weekday) -> bool {
        self.contract.works_on(self.first_day, day)
    }
}

// ── DriverStore ───────────────────────────────────────────────────────────────

/// Arena of drivers for one candidate configuration, indexed by `DriverId`.
///
/// IDs are dense: driver `i` lives at index `i`.  Created once per candidate,
/// discarded when the candidate is scored.
#[derive(Clone, Debug, Default)]
pub struct DriverStore {
    drivers: Vec<Driver>,
}

impl DriverStore {
    pub(crate) fn from_drivers(drivers: Vec<Driver>) -> Self {
        debug_assert!(drivers.iter().enumerate().all(|(i, d)| d.id.index() == i));
        Self { drivers }
    }

    #[inline]
    pub fn get(&self, id: DriverId) -> &Driver {
        &self.drivers[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: DriverId) -> &mut Driver {
        &mut self.drivers[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.iter()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Number of drivers on `contract`.
    pub fn count_of(&self, contract: ContractType) -> usize {
        self.drivers.iter().filter(|d| d.contract == contract).count()
    }
}
