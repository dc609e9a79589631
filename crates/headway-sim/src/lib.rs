//! `headway-sim`: entity model, day dispatch simulator, and loss evaluator.
//!
//! # Day dispatch loop
//!
//! ```text
//! now = service_start
//! while now < service_end:
//!   ① Peak    : polling interval / max headway switch to the peak value
//!               inside a peak window.
//!   ② Returns : drain `busy` drivers whose route has ended: release the bus,
//!               then lunch (> 4 routes), short break (> 2 routes), or back
//!               to `available`.
//!   ③ Rested  : drain `on_break` drivers whose rest has ended into
//!               `available`.
//!   ④ Dispatch: if a full polling interval has passed since the last
//!               departure and both a driver and a bus are free, pair them
//!               and record a Shift.
//!   ⑤ Advance : now += polling interval.
//! ```
//!
//! Drivers and buses live in arenas indexed by [`DriverId`] / [`BusId`];
//! queues hold IDs only, so a driver is in exactly one queue at any instant.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`driver`]     | `ContractType`, `Driver`, `DriverDayState`, `DriverStore`|
//! | [`builder`]    | `RosterBuilder` (driver split + first days → store)      |
//! | [`fleet`]      | `Fleet`, `BusPool`                                       |
//! | [`rotation`]   | weekly roster filter, per-day driver counts              |
//! | [`shift`]      | `Shift`, `WeeklySchedule`                                |
//! | [`queues`]     | `DispatchQueues` (available / busy / on-break)           |
//! | [`dispatch`]   | `DaySim`, `simulate_day`, `simulate_week`                |
//! | [`observer`]   | `DispatchObserver`, `NoopObserver`                       |
//! | [`loss`]       | `HeadwayPolicy`, `LossBreakdown`, `weekly_loss`          |
//!
//! [`DriverId`]: headway_core::DriverId
//! [`BusId`]: headway_core::BusId

pub mod builder;
pub mod dispatch;
pub mod driver;
pub mod fleet;
pub mod loss;
pub mod observer;
pub mod queues;
pub mod rotation;
pub mod shift;


pub use builder::RosterBuilder;
pub use dispatch::{DaySim, simulate_day, simulate_week, simulate_week_observed};
pub use driver::{ContractType, Driver, DriverDayState, DriverStore};
pub use fleet::{BusPool, Fleet};
pub use loss::{HeadwayPolicy, INFEASIBLE_DAY_PENALTY, LossBreakdown, day_waiting_penalty, loss, weekly_loss};
pub use observer::{DispatchObserver, NoopObserver, RestKind, WaitReason};
pub use queues::{DispatchQueues, DriverStatus};
pub use rotation::{per_day_driver_counts, roster_for_day};
pub use shift::{Shift, WeeklySchedule};
