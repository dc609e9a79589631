//! Genetic optimisation of a single-day dispatch sequence.
//!
//! For every driver-pool size in [`RosterConfig::genetic_pool_range`] an
//! independent population is evolved; the overall winner is the lowest
//! fitness across pools, with the smaller pool winning ties.
//!
//! Each pool draws from its own child of the caller's [`SearchRng`].  The
//! children are derived sequentially before any work is fanned out, so a
//! given seed produces the same outcome with or without the `parallel`
//! feature.

mod individual;
mod operators;
mod population;

pub use individual::{Dispatch, EMPTY_SCHEDULE_FITNESS, Individual, MIN_REDISPATCH_GAP_SECS};
pub use operators::{crossover, mutate, tournament_select};
pub use population::{Population, Scored};

use headway_core::{RosterConfig, RosterError, RosterResult, SearchRng};
use tracing::{debug, info, warn};

// ── Per-pool optimisation ─────────────────────────────────────────────────────

/// What one pool size produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolResult {
    pub pool_size:    usize,
    /// Fittest individual seen in any generation after cleaning.
    pub best:         Option<Scored>,
    pub generations:  usize,
    /// Generation at which the population died out, if it did.
    pub exhausted_at: Option<usize>,
}

/// Evolve one population of drivers `D0..D{pool_size}`.
pub fn optimize_pool(pool_size: usize, config: &RosterConfig, rng: &mut SearchRng) -> PoolResult {
    let mut population = Population::initial(pool_size, config, rng);
    let mut best: Option<Scored> = None;
    let mut generations = 0;
    let mut exhausted_at = None;

    for generation in 0..config.genetic.generations {
        let children = population.breed(pool_size, config, rng);
        population = match Population::cleaned(children, pool_size, generation, config, rng) {
            Ok(next) => next,
            Err(e) => {
                warn!(pool_size, generation, error = %e, "population died out");
                exhausted_at = Some(generation);
                break;
            }
        };
        generations += 1;

        if let Some(current) = population.best() {
            if best.as_ref().is_none_or(|b| current.fitness < b.fitness) {
                debug!(pool_size, generation, fitness = current.fitness, "new best");
                best = Some(current.clone());
            }
        }
    }

    info!(
        pool_size,
        generations,
        fitness = best.as_ref().map(|b| b.fitness),
        "pool finished"
    );
    PoolResult { pool_size, best, generations, exhausted_at }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// The best dispatch sequence found by [`run_genetic_search`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeneticOutcome {
    pub schedule:     Vec<Dispatch>,
    pub fitness:      f64,
    /// Pool size that produced the winner.
    pub pool_size:    usize,
    /// Distinct drivers actually used by the winner.
    pub driver_count: usize,
    pub valid:        bool,
}

impl GeneticOutcome {
    fn from_pool(pool_size: usize, winner: Scored) -> Self {
        Self {
            driver_count: winner.individual.driver_count(),
            valid:        winner.individual.is_valid(),
            fitness:      winner.fitness,
            schedule:     winner.individual.dispatches,
            pool_size,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Evolve a population for every pool size and return the fittest sequence.
///
/// # Errors
///
/// - [`RosterError::InvalidConfiguration`] if `config` fails validation.
/// - [`RosterError::SearchExhausted`] if every pool died out before
///   producing a single survivor.
pub fn run_genetic_search(config: &RosterConfig, rng: &mut SearchRng) -> RosterResult<GeneticOutcome> {
    config.validate()?;

    let jobs: Vec<(usize, SearchRng)> = config
        .genetic_pool_range()
        .map(|pool_size| (pool_size, rng.child(pool_size as u64)))
        .collect();

    info!(
        pools = jobs.len(),
        generations = config.genetic.generations,
        population = config.genetic.population_size,
        "genetic search started"
    );

    let results = run_pools(jobs, config);

    let mut winner: Option<(usize, Scored)> = None;
    for result in &results {
        let Some(candidate) = &result.best else {
            continue;
        };
        if winner.as_ref().is_none_or(|(_, w)| candidate.fitness < w.fitness) {
            winner = Some((result.pool_size, candidate.clone()));
        }
    }

    match winner {
        Some((pool_size, best)) => {
            let outcome = GeneticOutcome::from_pool(pool_size, best);
            info!(
                pool_size,
                fitness = outcome.fitness,
                dispatches = outcome.schedule.len(),
                valid = outcome.valid,
                "genetic search finished"
            );
            Ok(outcome)
        }
        None => {
            let (pool_size, generation) = results
                .iter()
                .find_map(|r| r.exhausted_at.map(|g| (r.pool_size, g)))
                .unwrap_or((*config.genetic_pool_range().start(), 0));
            Err(RosterError::SearchExhausted { pool_size, generation })
        }
    }
}

/// Run every pool; results come back in pool-size order.
fn run_pools(jobs: Vec<(usize, SearchRng)>, config: &RosterConfig) -> Vec<PoolResult> {
    #[cfg(not(feature = "parallel"))]
    {
        jobs.into_iter()
            .map(|(pool_size, mut rng)| optimize_pool(pool_size, config, &mut rng))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        jobs.into_par_iter()
            .map(|(pool_size, mut rng)| optimize_pool(pool_size, config, &mut rng))
            .collect()
    }
}
