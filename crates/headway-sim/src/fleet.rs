//! The bus fleet and the per-day pool of idle buses.
//!
//! Buses carry no state of their own: a bus is either in the day's
//! [`BusPool`] or attached to exactly one busy driver
//! (`DriverDayState::current_bus`).

use headway_core::BusId;

/// The fixed set of buses for a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fleet {
    buses: Vec<BusId>,
}

impl Fleet {
    /// `count` buses with IDs `0..count`.
    pub fn new(count: u32) -> Self {
        Self {
            buses: (0..count).map(BusId).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    /// A fresh pool holding every bus, for the start of a day.
    pub fn pool(&self) -> BusPool {
        BusPool {
            idle: self.buses.clone(),
        }
    }
}

/// Idle buses during one simulated day.  Last released, first taken.
#[derive(Clone, Debug)]
pub struct BusPool {
    idle: Vec<BusId>,
}

impl BusPool {
    #[inline]
    pub fn take(&mut self) -> Option<BusId> {
        self.idle.pop()
    }

    #[inline]
    pub fn release(&mut self, bus: BusId) {
        debug_assert!(!self.idle.contains(&bus), "{bus} released twice");
        self.idle.push(bus);
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }
}
