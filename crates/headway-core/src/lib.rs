//! `headway-core`: foundational types for the `headway` roster engine.
//!
//! This crate is a dependency of every other `headway-*` crate.  It has no
//! `headway-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DriverId`, `BusId`                                   |
//! | [`time`]        | `ClockTime`, `Weekday`, `PeakWindow`                  |
//! | [`config`]      | `RosterConfig`, `GeneticConfig`, `FirstDayStrategy`   |
//! | [`rng`]         | `SearchRng` (seeded, splittable per worker)           |
//! | [`error`]       | `RosterError`, `RosterResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to IDs, times, and config.  |
//! |         | Clock times use the `"HH:MM"` string form.                 |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FirstDayStrategy, GeneticConfig, RosterConfig};
pub use error::{RosterError, RosterResult};
pub use ids::{BusId, DriverId};
pub use rng::SearchRng;
pub use time::{ClockTime, DAYS_PER_WEEK, MINUTES_PER_DAY, PeakWindow, Weekday};
