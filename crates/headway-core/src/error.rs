//! Engine error type.
//!
//! Infeasible rosters are not errors: a day nobody can drive is an empty shift
//! list and is priced by the loss function.  Only malformed input and a
//! collapsed genetic population are reported here.

use thiserror::Error;

/// The error type shared by all `headway-*` crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Rejected by [`RosterConfig::validate`][crate::RosterConfig::validate]
    /// before any simulation runs.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("parse error: {0}")]
    Parse(String),

    /// Every individual of a genetic population was invalid and the
    /// replacement cap was spent, leaving nothing to select from.
    #[error("genetic population for {pool_size} drivers emptied at generation {generation}")]
    SearchExhausted { pool_size: usize, generation: usize },
}

/// Shorthand result type for all `headway-*` crates.
pub type RosterResult<T> = Result<T, RosterError>;
