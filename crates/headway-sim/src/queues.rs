//! `DispatchQueues`: the three driver queues of one simulated day.
//!
//! | Queue       | Order                          | Insert                       |
//! |-------------|--------------------------------|------------------------------|
//! | `available` | dispatch order (head first)    | alternating head / tail      |
//! | `busy`      | `next_available`, earliest head| tail (route length is fixed) |
//! | `on_break`  | `next_available`, earliest head| sorted position              |
//!
//! A driver ID is in at most one queue at a time.  The alternating insert on
//! `available` spreads dispatch opportunity between contract types instead of
//! always favouring whichever type queued first.

use std::collections::VecDeque;

use headway_core::{ClockTime, DriverId};

use crate::{ContractType, DriverStore};

/// Which queue a driver currently sits in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DriverStatus {
    Available,
    Busy,
    OnBreak,
}

#[derive(Default, Debug)]
pub struct DispatchQueues {
    available: VecDeque<DriverId>,
    busy:      VecDeque<DriverId>,
    on_break:  VecDeque<DriverId>,
}

impl DispatchQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the start-of-day `available` queue from today's roster,
    /// alternating type A and type B drivers (A first) until one type runs
    /// out, then appending the rest.
    pub fn seeded(roster: &[DriverId], drivers: &DriverStore) -> Self {
        let (mut type_a, mut type_b): (VecDeque<DriverId>, VecDeque<DriverId>) = roster
            .iter()
            .partition(|&&id| drivers.get(id).contract == ContractType::A);

        let mut queues = Self::new();
        while !type_a.is_empty() || !type_b.is_empty() {
            let prefer_a = queues.available.len() % 2 == 0;
            let next = match (prefer_a, type_a.is_empty(), type_b.is_empty()) {
                (_, false, true) | (true, false, false) => type_a.pop_front(),
                _ => type_b.pop_front(),
            };
            queues.available.extend(next);
        }
        queues
    }

    // ── available ─────────────────────────────────────────────────────────

    /// Return a driver to `available`: tail when the queue length is even,
    /// head when odd.
    pub fn make_available(&mut self, driver: DriverId) {
        if self.available.len() % 2 == 0 {
            self.available.push_back(driver);
        } else {
            self.available.push_front(driver);
        }
    }

    #[inline]
    pub fn pop_available(&mut self) -> Option<DriverId> {
        self.available.pop_front()
    }

    // ── busy ──────────────────────────────────────────────────────────────

    /// Append a just-dispatched driver.  Dispatch times only increase and
    /// the route length is fixed, so the tail is always the latest return.
    pub fn push_busy(&mut self, driver: DriverId) {
        self.busy.push_back(driver);
    }

    /// Pop the head of `busy` if its route has ended by `now`.
    pub fn pop_returned(&mut self, now: ClockTime, drivers: &DriverStore) -> Option<DriverId> {
        pop_due(&mut self.busy, now, drivers)
    }

    // ── on_break ──────────────────────────────────────────────────────────

    /// Insert a resting driver after every driver due no later than it.
    pub fn push_on_break(&mut self, driver: DriverId, drivers: &DriverStore) {
        let due = drivers.get(driver).state.next_available;
        let pos = self
            .on_break
            .partition_point(|&other| drivers.get(other).state.next_available <= due);
        self.on_break.insert(pos, driver);
    }

    /// Pop the head of `on_break` if its rest has ended by `now`.
    pub fn pop_rested(&mut self, now: ClockTime, drivers: &DriverStore) -> Option<DriverId> {
        pop_due(&mut self.on_break, now, drivers)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn status_of(&self, driver: DriverId) -> Option<DriverStatus> {
        if self.available.contains(&driver) {
            Some(DriverStatus::Available)
        } else if self.busy.contains(&driver) {
            Some(DriverStatus::Busy)
        } else if self.on_break.contains(&driver) {
            Some(DriverStatus::OnBreak)
        } else {
            None
        }
    }

    pub fn available(&self) -> impl Iterator<Item = DriverId> + '_ {
        self.available.iter().copied()
    }

    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    pub fn busy_len(&self) -> usize {
        self.busy.len()
    }

    pub fn on_break_len(&self) -> usize {
        self.on_break.len()
    }

    /// Drivers across all three queues.
    pub fn len(&self) -> usize {
        self.available.len() + self.busy.len() + self.on_break.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn pop_due(queue: &mut VecDeque<DriverId>, now: ClockTime, drivers: &DriverStore) -> Option<DriverId> {
    let &head = queue.front()?;
    if drivers.get(head).state.next_available <= now {
        queue.pop_front()
    } else {
        None
    }
}
