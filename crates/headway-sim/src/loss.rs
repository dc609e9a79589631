//! Schedule quality: quadratic headway penalty plus a driver-count penalty.
//!
//! ```text
//! waiting  = Σ_days [ day empty ? INFEASIBLE_DAY_PENALTY
//!                               : Σ_adjacent max(0, headway - max_wait)² ]
//! drivers  = driver_count²
//! total    = waiting_weight · waiting + driver_weight · drivers
//! ```
//!
//! `max_wait` is chosen by whether the *earlier* departure of the pair falls
//! in a peak window.  Lower is better.

use headway_core::{ClockTime, PeakWindow, RosterConfig};

use crate::{Shift, WeeklySchedule};

/// Added to the waiting term for each day without a single dispatch.
pub const INFEASIBLE_DAY_PENALTY: f64 = 400_000_000.0;

// ── HeadwayPolicy ─────────────────────────────────────────────────────────────

/// Peak-aware maximum headway and the quadratic excess penalty.
///
/// Shared by the roster loss and the genetic fitness, which use different
/// thresholds.
#[derive(Copy, Clone, Debug)]
pub struct HeadwayPolicy<'a> {
    pub peak_windows:      &'a [PeakWindow],
    pub peak_max_wait:     u32,
    pub off_peak_max_wait: u32,
}

impl<'a> HeadwayPolicy<'a> {
    /// The roster thresholds of `config`.
    pub fn roster(config: &'a RosterConfig) -> Self {
        Self {
            peak_windows:      &config.peak_windows,
            peak_max_wait:     config.peak_max_wait,
            off_peak_max_wait: config.off_peak_max_wait,
        }
    }

    /// The genetic optimizer's thresholds of `config`.
    pub fn genetic(config: &'a RosterConfig) -> Self {
        Self {
            peak_windows:      &config.peak_windows,
            peak_max_wait:     config.genetic.peak_max_wait,
            off_peak_max_wait: config.genetic.off_peak_max_wait,
        }
    }

    pub fn max_wait_at(&self, t: ClockTime) -> u32 {
        if self.peak_windows.iter().any(|w| w.contains(t)) {
            self.peak_max_wait
        } else {
            self.off_peak_max_wait
        }
    }

    /// `(headway - max_wait)²` if the gap from `from` to `to` is too long,
    /// else zero.  A negative gap is never penalised.
    pub fn gap_penalty(&self, from: ClockTime, to: ClockTime) -> f64 {
        let excess = (to - from) - i64::from(self.max_wait_at(from));
        if excess > 0 {
            (excess as f64).powi(2)
        } else {
            0.0
        }
    }

    /// Sum of [`gap_penalty`](Self::gap_penalty) over adjacent departures.
    pub fn sequence_penalty<I>(&self, departures: I) -> f64
    where
        I: IntoIterator<Item = ClockTime>,
    {
        let mut iter = departures.into_iter();
        let Some(mut prev) = iter.next() else {
            return 0.0;
        };
        let mut total = 0.0;
        for next in iter {
            total += self.gap_penalty(prev, next);
            prev = next;
        }
        total
    }
}

// ── LossBreakdown ─────────────────────────────────────────────────────────────

/// The components of a weekly loss.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LossBreakdown {
    /// Unweighted headway penalty, including infeasible-day penalties.
    pub waiting:         f64,
    /// Unweighted driver-count penalty.
    pub drivers:         f64,
    pub infeasible_days: usize,
    /// `waiting_weight · waiting + driver_weight · drivers`.
    pub total:           f64,
}

/// Unweighted headway penalty of one non-empty day.
pub fn day_waiting_penalty(shifts: &[Shift], config: &RosterConfig) -> f64 {
    HeadwayPolicy::roster(config).sequence_penalty(shifts.iter().map(|s| s.start))
}

/// Score `schedule`, produced by a roster of `driver_count` drivers.
pub fn weekly_loss(schedule: &WeeklySchedule, driver_count: usize, config: &RosterConfig) -> LossBreakdown {
    let mut waiting = 0.0;
    let mut infeasible_days = 0;
    for (_, shifts) in schedule.iter() {
        if shifts.is_empty() {
            waiting += INFEASIBLE_DAY_PENALTY;
            infeasible_days += 1;
        } else {
            waiting += day_waiting_penalty(shifts, config);
        }
    }

    let drivers = (driver_count as f64).powi(2);
    LossBreakdown {
        waiting,
        drivers,
        infeasible_days,
        total: config.waiting_weight * waiting + config.driver_weight * drivers,
    }
}

/// Scalar loss of `schedule`; see [`weekly_loss`].
pub fn loss(schedule: &WeeklySchedule, driver_count: usize, config: &RosterConfig) -> f64 {
    weekly_loss(schedule, driver_count, config).total
}
