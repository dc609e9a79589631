//! The `DaySim` struct and its tick loop.

use headway_core::{ClockTime, DriverId, RosterConfig, RosterResult, Weekday};

use crate::{
    BusPool, DispatchObserver, DispatchQueues, DriverStore, Fleet, NoopObserver, RestKind, Shift,
    WaitReason, WeeklySchedule, roster_for_day,
};

/// A returning driver with more completed routes than this takes a short break.
const BREAK_AFTER_ROUTES: u32 = 2;
/// A returning driver with more completed routes than this takes lunch.
const LUNCH_AFTER_ROUTES: u32 = 4;

// ── DaySim ────────────────────────────────────────────────────────────────────

/// One day of dispatch simulation for one roster.
///
/// `DaySim` borrows the candidate's driver arena (whose per-day state it
/// resets on construction) and owns the day's queues, bus pool, and output.
/// Each tick:
///
/// 1. **Returns**: busy drivers whose route has ended release their bus and
///    go to lunch, a short break, or straight back to `available`.
/// 2. **Rested**: drivers whose rest has ended rejoin `available`.
/// 3. **Dispatch**: if at least one polling interval has passed since the
///    last departure, pair the head of `available` with an idle bus.
///
/// The clock then advances by the polling interval in force at that tick,
/// and by at least one minute.  A roster with nobody on it produces no
/// shifts and runs no ticks.
///
/// `DaySim` trusts its config; the `simulate_*` entry points validate it.
pub struct DaySim<'a> {
    config:        &'a RosterConfig,
    day:           Weekday,
    drivers:       &'a mut DriverStore,
    queues:        DispatchQueues,
    buses:         BusPool,
    clock:         ClockTime,
    last_dispatch: Option<ClockTime>,
    shifts:        Vec<Shift>,
}

impl<'a> DaySim<'a> {
    /// Reset the rostered drivers' day state and seed the queues.
    pub fn new(
        config:  &'a RosterConfig,
        day:     Weekday,
        drivers: &'a mut DriverStore,
        roster:  &[DriverId],
        fleet:   &Fleet,
    ) -> Self {
        for &id in roster {
            drivers.get_mut(id).state.reset(config.service_start);
        }
        let queues = DispatchQueues::seeded(roster, drivers);

        Self {
            config,
            day,
            drivers,
            queues,
            buses:         fleet.pool(),
            clock:         config.service_start,
            last_dispatch: None,
            shifts:        Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the whole service day and return its shifts in dispatch order.
    pub fn run<O: DispatchObserver>(mut self, observer: &mut O) -> Vec<Shift> {
        observer.on_day_start(self.day, self.queues.len());
        self.run_until(self.config.service_end, observer);
        observer.on_day_end(self.day, &self.shifts);
        self.shifts
    }

    /// Process ticks while the clock is before `until` (capped at the end of
    /// the service day).  Useful for tests and incremental stepping.
    pub fn run_until<O: DispatchObserver>(&mut self, until: ClockTime, observer: &mut O) {
        if self.queues.is_empty() {
            return;
        }
        let end = until.min(self.config.service_end);
        while self.clock < end {
            let now = self.clock;
            let step = self.process_tick(now, observer);
            self.clock = now + step.max(1);
        }
    }

    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    pub fn queues(&self) -> &DispatchQueues {
        &self.queues
    }

    pub fn idle_buses(&self) -> usize {
        self.buses.len()
    }

    pub fn drivers(&self) -> &DriverStore {
        &*self.drivers
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process one tick and return the polling interval to advance by.
    fn process_tick<O: DispatchObserver>(&mut self, now: ClockTime, observer: &mut O) -> u32 {
        let interval = self.config.polling_interval_at(now);

        self.release_returned(now, observer);
        self.release_rested(now);

        let due = self
            .last_dispatch
            .is_none_or(|last| now.since(last) >= interval);
        if due {
            self.try_dispatch(now, observer);
        }

        interval
    }

    /// Drain `busy` drivers whose route ended by `now`.
    fn release_returned<O: DispatchObserver>(&mut self, now: ClockTime, observer: &mut O) {
        while let Some(id) = self.queues.pop_returned(now, self.drivers) {
            let state = &mut self.drivers.get_mut(id).state;
            if let Some(bus) = state.current_bus.take() {
                self.buses.release(bus);
            }

            let rest = match state.route_count {
                n if n > LUNCH_AFTER_ROUTES => Some((RestKind::Lunch, self.config.lunch_duration_mins)),
                n if n > BREAK_AFTER_ROUTES => Some((RestKind::Break, self.config.break_duration_mins)),
                _ => None,
            };

            match rest {
                Some((kind, mins)) => {
                    let until = now + mins;
                    state.next_available = until;
                    self.queues.push_on_break(id, self.drivers);
                    observer.on_rest(self.day, id, kind, until);
                }
                None => {
                    state.next_available = now;
                    self.queues.make_available(id);
                }
            }
        }
    }

    /// Drain `on_break` drivers whose rest ended by `now`.
    fn release_rested(&mut self, now: ClockTime) {
        while let Some(id) = self.queues.pop_rested(now, self.drivers) {
            self.drivers.get_mut(id).state.next_available = now;
            self.queues.make_available(id);
        }
    }

    /// Pair the head of `available` with an idle bus, or report the wait.
    fn try_dispatch<O: DispatchObserver>(&mut self, now: ClockTime, observer: &mut O) {
        if self.queues.available_len() == 0 {
            observer.on_wait(self.day, now, WaitReason::NoDriver);
            return;
        }
        if self.buses.is_empty() {
            observer.on_wait(self.day, now, WaitReason::NoBus);
            return;
        }
        let (Some(id), Some(bus)) = (self.queues.pop_available(), self.buses.take()) else {
            return;
        };

        let state = &mut self.drivers.get_mut(id).state;
        state.start_time.get_or_insert(now);
        state.next_available = now + self.config.route_duration_mins;
        state.route_count += 1;
        state.current_bus = Some(bus);
        self.queues.push_busy(id);

        let shift = Shift { driver: id, bus, start: now };
        observer.on_dispatch(self.day, &shift);
        self.shifts.push(shift);
        self.last_dispatch = Some(now);
    }
}

// ── Convenience entry points ──────────────────────────────────────────────────

/// Simulate one day for `roster` (a subset of `drivers`) without callbacks.
///
/// # Errors
///
/// [`RosterError::InvalidConfiguration`](headway_core::RosterError) if
/// `config` fails validation; nothing is simulated in that case.
pub fn simulate_day(
    config:  &RosterConfig,
    day:     Weekday,
    drivers: &mut DriverStore,
    roster:  &[DriverId],
    fleet:   &Fleet,
) -> RosterResult<Vec<Shift>> {
    config.validate()?;
    Ok(DaySim::new(config, day, drivers, roster, fleet).run(&mut NoopObserver))
}

/// Filter the roster and simulate every day of the week.
///
/// # Errors
///
/// As [`simulate_day`].
pub fn simulate_week(
    config:  &RosterConfig,
    drivers: &mut DriverStore,
    fleet:   &Fleet,
) -> RosterResult<WeeklySchedule> {
    simulate_week_observed(config, drivers, fleet, &mut NoopObserver)
}

/// [`simulate_week`] with observer callbacks.
pub fn simulate_week_observed<O: DispatchObserver>(
    config:   &RosterConfig,
    drivers:  &mut DriverStore,
    fleet:    &Fleet,
    observer: &mut O,
) -> RosterResult<WeeklySchedule> {
    config.validate()?;
    let mut schedule = WeeklySchedule::new();
    for day in Weekday::ALL {
        let roster = roster_for_day(drivers, day);
        let shifts = DaySim::new(config, day, drivers, &roster, fleet).run(observer);
        schedule.set_day(day, shifts);
    }
    Ok(schedule)
}
