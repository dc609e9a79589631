//! A single-day dispatch sequence and its fitness.

use headway_core::{ClockTime, DriverId, RosterConfig, SearchRng};
use headway_sim::HeadwayPolicy;
use rustc_hash::{FxHashMap, FxHashSet};

/// Two dispatches of the same driver must be at least this far apart.
pub const MIN_REDISPATCH_GAP_SECS: i64 = 3_600;

/// Fitness of a sequence without a single dispatch.
pub const EMPTY_SCHEDULE_FITNESS: f64 = 2_000_000_000.0;

/// One gene: `driver` departs at `start`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dispatch {
    pub driver: DriverId,
    pub start:  ClockTime,
}

/// An ordered sequence of dispatches over one service day, drawn from a pool
/// of drivers `D0..D{pool_size}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Individual {
    pub dispatches: Vec<Dispatch>,
}

impl Individual {
    pub fn new(dispatches: Vec<Dispatch>) -> Self {
        Self { dispatches }
    }

    /// Greedy random construction.
    ///
    /// Starting at `service_start`, repeatedly send a random free driver
    /// (one whose previous route has ended), mark them busy for one route,
    /// and advance the clock by a random entry of `dispatch_increments`.
    /// When nobody is free the clock jumps to the earliest return.  The
    /// result is time-ordered and valid whenever the route lasts at least an
    /// hour.
    pub fn generate(pool_size: usize, config: &RosterConfig, rng: &mut SearchRng) -> Self {
        let mut next_free = vec![config.service_start; pool_size];
        let mut free: Vec<DriverId> = Vec::with_capacity(pool_size);
        let mut dispatches = Vec::new();
        let mut now = config.service_start;

        while now < config.service_end {
            free.clear();
            free.extend(
                next_free
                    .iter()
                    .enumerate()
                    .filter(|&(_, &t)| t <= now)
                    .map(|(i, _)| DriverId(i as u32)),
            );

            let Some(&driver) = rng.choose(&free) else {
                match next_free.iter().min() {
                    Some(&earliest) => {
                        now = earliest;
                        continue;
                    }
                    None => break,
                }
            };

            dispatches.push(Dispatch { driver, start: now });
            next_free[driver.index()] = now + config.route_duration_mins;

            let Some(&step) = rng.choose(&config.genetic.dispatch_increments) else {
                break;
            };
            now = now + step;
        }

        Self { dispatches }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dispatches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }

    /// Number of distinct drivers used.
    pub fn driver_count(&self) -> usize {
        self.dispatches
            .iter()
            .map(|d| d.driver)
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Headway penalty (genetic thresholds) plus distinct drivers squared.
    /// Lower is better.
    pub fn fitness(&self, config: &RosterConfig) -> f64 {
        if self.is_empty() {
            return EMPTY_SCHEDULE_FITNESS;
        }
        let waiting = HeadwayPolicy::genetic(config).sequence_penalty(self.dispatches.iter().map(|d| d.start));
        let drivers = self.driver_count() as f64;
        waiting + drivers * drivers
    }

    /// Non-empty, and every driver's consecutive dispatches are at least
    /// [`MIN_REDISPATCH_GAP_SECS`] apart in sequence order.
    pub fn is_valid(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut last_start: FxHashMap<DriverId, ClockTime> = FxHashMap::default();
        for dispatch in &self.dispatches {
            if let Some(prev) = last_start.insert(dispatch.driver, dispatch.start) {
                if (dispatch.start - prev) * 60 < MIN_REDISPATCH_GAP_SECS {
                    return false;
                }
            }
        }
        true
    }
}
