//! Engine configuration.
//!
//! One immutable [`RosterConfig`] value is passed into every entry point; the
//! engine keeps no process-wide state.  `Default` is the standard
//! operating point (20 buses, hourly routes, 10/20 minute headway targets).

use std::ops::RangeInclusive;

use crate::{ClockTime, PeakWindow, RosterError, RosterResult};

// ── FirstDayStrategy ──────────────────────────────────────────────────────────

/// How the roster enumerator assigns each driver's first working day.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FirstDayStrategy {
    /// Type A spread 40/30/30 over three anchor weekdays, type B alternating
    /// between two.  One roster per driver split.
    #[default]
    Distributed,
    /// Every assignment of every driver to one of the three anchor weekdays.
    /// `3^n` rosters per split: only practical for small driver counts.
    Exhaustive,
}

// ── GeneticConfig ─────────────────────────────────────────────────────────────

/// Parameters of the single-pool genetic optimizer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneticConfig {
    pub generations:     usize,
    pub population_size: usize,
    /// Probability that a child gets one dispatch mutated.
    pub mutation_rate:   f64,
    pub tournament_size: usize,

    /// Headway target inside peak windows, minutes.
    pub peak_max_wait:     u32,
    /// Headway target outside peak windows, minutes.
    pub off_peak_max_wait: u32,

    /// At most this many invalid individuals per generation are replaced by
    /// fresh ones; the rest are dropped.
    pub max_invalid_replacements: usize,

    /// Clock increments (minutes) the greedy constructor picks from.
    pub dispatch_increments: Vec<u32>,
    /// Time offsets (minutes) a mutation picks from.
    pub mutation_offsets:    Vec<i32>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            generations:              100,
            population_size:          20,
            mutation_rate:            0.1,
            tournament_size:          3,
            peak_max_wait:            5,
            off_peak_max_wait:        15,
            max_invalid_replacements: 10,
            dispatch_increments:      vec![5, 10, 15, 20],
            mutation_offsets:         vec![-5, 5, 10],
        }
    }
}

// ── RosterConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Typically built from `Default` and tweaked, or loaded from JSON by the
/// application crate (with the `serde` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RosterConfig {
    /// Fleet size.  Buses are pooled and exchanged between drivers.
    pub bus_count: u32,

    /// Minutes a driver+bus pair is occupied per dispatch.
    pub route_duration_mins: u32,
    /// Short rest after more than two routes in a day.
    pub break_duration_mins: u32,
    /// Long rest after more than four routes in a day.
    pub lunch_duration_mins: u32,

    /// First tick of every simulated day.
    pub service_start: ClockTime,
    /// Exclusive end of every simulated day; usually past midnight.
    pub service_end:   ClockTime,

    pub peak_windows:      Vec<PeakWindow>,
    /// Max headway (and dispatch polling interval) inside peak windows, minutes.
    pub peak_max_wait:     u32,
    /// Max headway (and dispatch polling interval) outside peak windows, minutes.
    pub off_peak_max_wait: u32,
    /// Treat a tick as peak when a route departing now would end inside a
    /// peak window, so frequency ramps up ahead of the rush.
    pub anticipate_peaks:  bool,

    pub driver_weight:  f64,
    pub waiting_weight: f64,

    /// Smallest total driver count the enumerator tries.
    pub min_driver_count: usize,
    /// Largest total driver count the enumerator tries.
    pub max_driver_count: usize,
    pub first_day_strategy: FirstDayStrategy,

    pub genetic: GeneticConfig,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            bus_count:           20,
            route_duration_mins: 60,
            break_duration_mins: 15,
            lunch_duration_mins: 60,
            service_start:       ClockTime::from_hm(6, 0),
            service_end:         ClockTime::from_hm(24 + 3, 0),
            peak_windows: vec![
                PeakWindow::new(ClockTime::from_hm(7, 0), ClockTime::from_hm(9, 0)),
                PeakWindow::new(ClockTime::from_hm(17, 0), ClockTime::from_hm(19, 0)),
            ],
            peak_max_wait:       10,
            off_peak_max_wait:   20,
            anticipate_peaks:    false,
            driver_weight:       5.0,
            waiting_weight:      100.0,
            min_driver_count:    4,
            max_driver_count:    20,
            first_day_strategy:  FirstDayStrategy::Distributed,
            genetic:             GeneticConfig::default(),
        }
    }
}

impl RosterConfig {
    /// Reject configurations no simulation can run on.
    pub fn validate(&self) -> RosterResult<()> {
        let invalid = |msg: String| Err(RosterError::InvalidConfiguration(msg));

        if self.bus_count == 0 {
            return invalid("bus_count must be at least 1".into());
        }
        if self.route_duration_mins == 0 {
            return invalid("route_duration_mins must be positive".into());
        }
        if self.peak_max_wait == 0 || self.off_peak_max_wait == 0 {
            return invalid("max wait thresholds must be positive".into());
        }
        if self.service_start >= self.service_end {
            return invalid(format!(
                "service day is empty: {:#} .. {:#}",
                self.service_start, self.service_end
            ));
        }
        if let Some(w) = self.peak_windows.iter().find(|w| w.start >= w.end) {
            return invalid(format!("peak window {:#} .. {:#} is empty", w.start, w.end));
        }
        if self.min_driver_count == 0 {
            return invalid("min_driver_count must be at least 1".into());
        }
        if self.min_driver_count > self.max_driver_count {
            return invalid(format!(
                "driver count range {}..={} is empty",
                self.min_driver_count, self.max_driver_count
            ));
        }

        let g = &self.genetic;
        if g.generations == 0 || g.population_size == 0 || g.tournament_size == 0 {
            return invalid("generations, population_size and tournament_size must be positive".into());
        }
        if !(0.0..=1.0).contains(&g.mutation_rate) {
            return invalid(format!("mutation_rate {} outside [0, 1]", g.mutation_rate));
        }
        if g.dispatch_increments.is_empty() || g.dispatch_increments.contains(&0) {
            return invalid("dispatch_increments must be non-empty and positive".into());
        }
        if g.mutation_offsets.is_empty() {
            return invalid("mutation_offsets must be non-empty".into());
        }
        Ok(())
    }

    /// `true` if `t` falls inside any peak window.
    #[inline]
    pub fn is_peak(&self, t: ClockTime) -> bool {
        self.peak_windows.iter().any(|w| w.contains(t))
    }

    /// Peak test used by the dispatcher: honours `anticipate_peaks`.
    pub fn is_dispatch_peak(&self, t: ClockTime) -> bool {
        self.is_peak(t) || (self.anticipate_peaks && self.is_peak(t + self.route_duration_mins))
    }

    /// Maximum allowed headway at `t`, minutes.
    #[inline]
    pub fn max_wait_at(&self, t: ClockTime) -> u32 {
        if self.is_peak(t) { self.peak_max_wait } else { self.off_peak_max_wait }
    }

    /// Dispatch polling interval at `t`, minutes.
    #[inline]
    pub fn polling_interval_at(&self, t: ClockTime) -> u32 {
        if self.is_dispatch_peak(t) { self.peak_max_wait } else { self.off_peak_max_wait }
    }

    /// Total driver counts the enumerator iterates over.
    pub fn driver_count_range(&self) -> RangeInclusive<usize> {
        self.min_driver_count..=self.max_driver_count
    }

    /// Pool sizes the genetic optimizer iterates over: half the fleet up to
    /// the whole fleet.
    pub fn genetic_pool_range(&self) -> RangeInclusive<usize> {
        let buses = self.bus_count as usize;
        (buses / 2).max(1)..=buses
    }
}
