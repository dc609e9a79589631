//! Dispatch observer trait for progress reporting and diagnostics.

use headway_core::{ClockTime, DriverId, Weekday};

use crate::Shift;

/// Why a due dispatch did not happen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WaitReason {
    NoDriver,
    NoBus,
}

/// Which rest a returning driver was sent to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RestKind {
    Break,
    Lunch,
}

/// Callbacks invoked by [`DaySim::run`][crate::DaySim::run] at key points of
/// the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: counting missed departures
///
/// ```rust
/// use headway_core::{ClockTime, Weekday};
/// use headway_sim::{DispatchObserver, WaitReason};
///
/// #[derive(Default)]
/// struct MissedDepartures { no_bus: usize, no_driver: usize }
///
/// impl DispatchObserver for MissedDepartures {
///     fn on_wait(&mut self, _day: Weekday, _now: ClockTime, reason: WaitReason) {
///         match reason {
///             WaitReason::NoBus => self.no_bus += 1,
///             WaitReason::NoDriver => self.no_driver += 1,
///         }
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called before the first tick with the number of drivers rostered today.
    fn on_day_start(&mut self, _day: Weekday, _rostered: usize) {}

    /// Called for every recorded shift.
    fn on_dispatch(&mut self, _day: Weekday, _shift: &Shift) {}

    /// Called when a dispatch was due but no driver or no bus was free.
    fn on_wait(&mut self, _day: Weekday, _now: ClockTime, _reason: WaitReason) {}

    /// Called when a returning driver is sent to rest until `until`.
    fn on_rest(&mut self, _day: Weekday, _driver: DriverId, _kind: RestKind, _until: ClockTime) {}

    /// Called once after the last tick with the day's shifts.
    fn on_day_end(&mut self, _day: Weekday, _shifts: &[Shift]) {}
}

/// A [`DispatchObserver`] that does nothing.  Used by the search paths, which
/// only need the shifts.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
