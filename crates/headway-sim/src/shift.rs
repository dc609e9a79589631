//! Simulator output: shifts and the weekly schedule.

use headway_core::{BusId, ClockTime, DAYS_PER_WEEK, DriverId, Weekday};

/// One dispatch: `driver` leaves with `bus` at `start`.  Immutable once
/// recorded.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub driver: DriverId,
    pub bus:    BusId,
    pub start:  ClockTime,
}

/// Seven ordered shift sequences, index 0..6 = Monday..Sunday.
///
/// Each day's sequence is in dispatch order, which is non-decreasing in
/// `start`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklySchedule {
    days: [Vec<Shift>; DAYS_PER_WEEK],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn day(&self, day: Weekday) -> &[Shift] {
        &self.days[day.index()]
    }

    pub fn set_day(&mut self, day: Weekday, shifts: Vec<Shift>) {
        self.days[day.index()] = shifts;
    }

    /// `(weekday, shifts)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Shift])> {
        Weekday::ALL.into_iter().zip(self.days.iter().map(Vec::as_slice))
    }

    pub fn total_shifts(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    /// Days with no dispatch at all.
    pub fn empty_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_empty()).count()
    }

    /// `true` if every day's start times are non-decreasing.
    pub fn is_time_ordered(&self) -> bool {
        self.days
            .iter()
            .all(|d| d.windows(2).all(|w| w[0].start <= w[1].start))
    }
}
