//! Candidate rosters and the order in which they are enumerated.
//!
//! A candidate is a driver split (`type_a`, `type_b`) plus one first working
//! day per driver.  Candidates are numbered in enumeration order; that index
//! is the tie-breaker when two candidates score the same loss.

use headway_core::{FirstDayStrategy, RosterConfig, RosterResult, Weekday};
use headway_sim::{DriverStore, RosterBuilder};

/// First days a type-A driver may be anchored on: Mon, Tue, Wed.
pub const TYPE_A_ANCHORS: [Weekday; 3] = [Weekday::new(0), Weekday::new(1), Weekday::new(2)];

/// First days type-B drivers alternate between: Mon, Tue.
pub const TYPE_B_ANCHORS: [Weekday; 2] = [Weekday::new(0), Weekday::new(1)];

/// Share of type-A drivers anchored on each of [`TYPE_A_ANCHORS`].
const TYPE_A_SPREAD: [f64; 3] = [0.4, 0.3, 0.3];

// ── RosterCandidate ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterCandidate {
    /// Position in enumeration order.
    pub index:      usize,
    pub type_a:     usize,
    pub type_b:     usize,
    /// One entry per driver: all type A, then all type B.
    pub first_days: Vec<Weekday>,
}

impl RosterCandidate {
    #[inline]
    pub fn driver_count(&self) -> usize {
        self.type_a + self.type_b
    }

    /// Materialise the candidate's driver arena.
    pub fn build_store(&self) -> RosterResult<DriverStore> {
        RosterBuilder::new(self.type_a, self.type_b)
            .first_days(self.first_days.clone())
            .build()
    }
}

// ── First-day plans ───────────────────────────────────────────────────────────

/// The single first-day assignment used by [`FirstDayStrategy::Distributed`].
///
/// Type A drivers fill the anchors in order; the cut-offs are the cumulative
/// floors of 40 %, 30 % and the remainder of `type_a`, and a driver moves on
/// to the next anchor once its position exceeds the current cut-off.  Type B
/// drivers alternate Mon, Tue.
pub fn distributed_first_days(type_a: usize, type_b: usize) -> Vec<Weekday> {
    let mut cutoffs = [0usize; 3];
    let mut acc = 0;
    for (cutoff, share) in cutoffs.iter_mut().zip(TYPE_A_SPREAD) {
        acc += (share * type_a as f64) as usize;
        *cutoff = acc;
    }
    cutoffs[2] = type_a;

    let mut slot = 0;
    let type_a_days = (0..type_a).map(|i| {
        if slot < cutoffs.len() - 1 && i > cutoffs[slot] {
            slot += 1;
        }
        TYPE_A_ANCHORS[slot]
    });
    let type_b_days = (0..type_b).map(|i| TYPE_B_ANCHORS[i % TYPE_B_ANCHORS.len()]);

    type_a_days.chain(type_b_days).collect()
}

/// Every assignment of `drivers` drivers to one of [`TYPE_A_ANCHORS`], in
/// odometer order (the last driver varies fastest).
///
/// Yields `3^drivers` vectors; zero drivers yield one empty vector.
#[derive(Clone, Debug)]
pub struct FirstDayAssignments {
    digits: Vec<usize>,
    done:   bool,
}

impl FirstDayAssignments {
    pub fn new(drivers: usize) -> Self {
        Self {
            digits: vec![0; drivers],
            done:   false,
        }
    }
}

impl Iterator for FirstDayAssignments {
    type Item = Vec<Weekday>;

    fn next(&mut self) -> Option<Vec<Weekday>> {
        if self.done {
            return None;
        }
        let current = self.digits.iter().map(|&d| TYPE_A_ANCHORS[d]).collect();

        self.done = true;
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < TYPE_A_ANCHORS.len() {
                self.done = false;
                break;
            }
            *digit = 0;
        }
        Some(current)
    }
}

/// First-day plans for one driver split.
enum FirstDayPlans {
    Single(Option<Vec<Weekday>>),
    All(FirstDayAssignments),
}

impl FirstDayPlans {
    fn new(strategy: FirstDayStrategy, type_a: usize, type_b: usize) -> Self {
        match strategy {
            FirstDayStrategy::Distributed => Self::Single(Some(distributed_first_days(type_a, type_b))),
            FirstDayStrategy::Exhaustive => Self::All(FirstDayAssignments::new(type_a + type_b)),
        }
    }
}

impl Iterator for FirstDayPlans {
    type Item = Vec<Weekday>;

    fn next(&mut self) -> Option<Vec<Weekday>> {
        match self {
            Self::Single(plan) => plan.take(),
            Self::All(assignments) => assignments.next(),
        }
    }
}

// ── Enumeration ───────────────────────────────────────────────────────────────

/// All candidates of `config` in enumeration order: total driver count
/// ascending, then type-A count ascending, then first-day plan.
pub fn enumerate_candidates(config: &RosterConfig) -> impl Iterator<Item = RosterCandidate> + Send + use<> {
    let strategy = config.first_day_strategy;
    config
        .driver_count_range()
        .flat_map(|total| (0..=total).map(move |type_a| (type_a, total - type_a)))
        .flat_map(move |(type_a, type_b)| {
            FirstDayPlans::new(strategy, type_a, type_b).map(move |first_days| (type_a, type_b, first_days))
        })
        .enumerate()
        .map(|(index, (type_a, type_b, first_days))| RosterCandidate {
            index,
            type_a,
            type_b,
            first_days,
        })
}
