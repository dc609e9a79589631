//! Exhaustive roster search.
//!
//! Every candidate from [`enumerate_candidates`] is simulated for a full week
//! and scored with [`weekly_loss`].  The reduction keeps the strictly lower
//! loss and, on an exact tie, the candidate that comes first in enumeration
//! order.  That ordering is total, so the parallel reduction returns the same
//! winner as a sequential scan.

use headway_core::{DAYS_PER_WEEK, RosterConfig, RosterError, RosterResult, Weekday};
use headway_sim::{Fleet, LossBreakdown, WeeklySchedule, per_day_driver_counts, simulate_week, weekly_loss};
use tracing::{debug, info};

use crate::{RosterCandidate, enumerate_candidates};

// ── Scoring ───────────────────────────────────────────────────────────────────

/// A simulated and scored candidate.
#[derive(Clone, Debug)]
pub struct CandidateScore {
    pub candidate:            RosterCandidate,
    pub schedule:             WeeklySchedule,
    pub breakdown:            LossBreakdown,
    pub per_day_driver_count: [usize; DAYS_PER_WEEK],
}

impl CandidateScore {
    /// `true` if `self` should replace `other` as the incumbent.
    fn beats(&self, other: &CandidateScore) -> bool {
        let (mine, theirs) = (self.breakdown.total, other.breakdown.total);
        mine < theirs || (mine == theirs && self.candidate.index < other.candidate.index)
    }
}

/// Simulate one candidate's week on `fleet` and score it.
pub fn evaluate_candidate(
    candidate: RosterCandidate,
    fleet:     &Fleet,
    config:    &RosterConfig,
) -> RosterResult<CandidateScore> {
    let mut drivers = candidate.build_store()?;
    let schedule = simulate_week(config, &mut drivers, fleet)?;
    let breakdown = weekly_loss(&schedule, drivers.len(), config);
    let per_day_driver_count = per_day_driver_counts(&drivers);

    debug!(
        index = candidate.index,
        type_a = candidate.type_a,
        type_b = candidate.type_b,
        shifts = schedule.total_shifts(),
        loss = breakdown.total,
        "candidate scored"
    );

    Ok(CandidateScore {
        candidate,
        schedule,
        breakdown,
        per_day_driver_count,
    })
}

/// Incumbent plus the number of candidates folded into it.
struct Best {
    score:     CandidateScore,
    evaluated: usize,
}

impl Best {
    fn merge(self, other: Best) -> Best {
        let evaluated = self.evaluated + other.evaluated;
        let score = if other.score.beats(&self.score) { other.score } else { self.score };
        Best { score, evaluated }
    }

    fn into_outcome(self) -> ExhaustiveOutcome {
        let CandidateScore {
            candidate,
            schedule,
            breakdown,
            per_day_driver_count,
        } = self.score;
        ExhaustiveOutcome {
            schedule,
            loss: breakdown.total,
            breakdown,
            per_day_driver_count,
            type_a: candidate.type_a,
            type_b: candidate.type_b,
            first_days: candidate.first_days,
            candidates_evaluated: self.evaluated,
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// The best roster found by [`run_exhaustive_search`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExhaustiveOutcome {
    pub schedule:             WeeklySchedule,
    pub loss:                 f64,
    pub breakdown:            LossBreakdown,
    /// Rostered drivers per weekday, Monday first.
    pub per_day_driver_count: [usize; DAYS_PER_WEEK],
    pub type_a:               usize,
    pub type_b:               usize,
    pub first_days:           Vec<Weekday>,
    pub candidates_evaluated: usize,
}

impl ExhaustiveOutcome {
    #[inline]
    pub fn driver_count(&self) -> usize {
        self.type_a + self.type_b
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Enumerate every candidate of `config`, simulate and score each, and
/// return the lowest-loss roster.
///
/// Deterministic: repeated calls with the same configuration return equal
/// outcomes, with or without the `parallel` feature.
///
/// # Errors
///
/// [`RosterError::InvalidConfiguration`] if `config` fails validation.
pub fn run_exhaustive_search(config: &RosterConfig) -> RosterResult<ExhaustiveOutcome> {
    config.validate()?;
    let fleet = Fleet::new(config.bus_count);

    info!(
        min_drivers = config.min_driver_count,
        max_drivers = config.max_driver_count,
        buses = config.bus_count,
        strategy = ?config.first_day_strategy,
        "exhaustive search started"
    );

    let best = reduce_candidates(config, &fleet)?.ok_or_else(|| {
        RosterError::InvalidConfiguration("configuration produced no roster candidates".into())
    })?;
    let outcome = best.into_outcome();

    info!(
        type_a = outcome.type_a,
        type_b = outcome.type_b,
        loss = outcome.loss,
        infeasible_days = outcome.breakdown.infeasible_days,
        evaluated = outcome.candidates_evaluated,
        "exhaustive search finished"
    );
    Ok(outcome)
}

fn reduce_candidates(config: &RosterConfig, fleet: &Fleet) -> RosterResult<Option<Best>> {
    #[cfg(not(feature = "parallel"))]
    {
        let mut best: Option<Best> = None;
        for candidate in enumerate_candidates(config) {
            let next = Best {
                score:     evaluate_candidate(candidate, fleet, config)?,
                evaluated: 1,
            };
            best = Some(match best {
                Some(incumbent) => incumbent.merge(next),
                None => next,
            });
        }
        Ok(best)
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        enumerate_candidates(config)
            .par_bridge()
            .map(|candidate| {
                evaluate_candidate(candidate, fleet, config).map(|score| Best { score, evaluated: 1 })
            })
            .try_reduce_with(|a, b| Ok(a.merge(b)))
            .transpose()
    }
}
