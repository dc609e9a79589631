//! `headway-search`: roster enumeration and schedule optimisation.
//!
//! Two independent searches share the simulator and loss of `headway-sim`:
//!
//! ```text
//! exhaustive:  for total in min_driver_count..=max_driver_count
//!                for type_a in 0..=total
//!                  for first_days in plans(type_a, total - type_a)
//!                    store   = RosterBuilder(type_a, type_b, first_days)
//!                    week    = simulate_week(store)
//!                    loss    = weekly_loss(week, total)
//!              keep the strictly lowest loss (earliest candidate on ties)
//!
//! genetic:     for pool_size in bus_count/2..=bus_count
//!                population = greedy random dispatch sequences
//!                repeat `generations` times:
//!                  tournament → crossover → mutate → clean → track best
//!              keep the lowest fitness over all pool sizes
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`candidate`]   | `RosterCandidate`, first-day plans, enumeration order  |
//! | [`exhaustive`]  | `run_exhaustive_search`, `ExhaustiveOutcome`           |
//! | [`genetic`]     | `run_genetic_search`, individuals, operators           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | (default) Candidates and pool sizes run on Rayon.       |
//! |            | Results are identical to the sequential build.          |
//! | `serde`    | Adds `Serialize` to the outcome types.                  |

pub mod candidate;
pub mod exhaustive;
pub mod genetic;

#[cfg(test)]
mod tests;

pub use candidate::{
    FirstDayAssignments, RosterCandidate, TYPE_A_ANCHORS, TYPE_B_ANCHORS, distributed_first_days,
    enumerate_candidates,
};
pub use exhaustive::{CandidateScore, ExhaustiveOutcome, evaluate_candidate, run_exhaustive_search};
pub use genetic::{
    Dispatch, EMPTY_SCHEDULE_FITNESS, GeneticOutcome, Individual, MIN_REDISPATCH_GAP_SECS, Population,
    PoolResult, Scored, crossover, mutate, optimize_pool, run_genetic_search, tournament_select,
};
