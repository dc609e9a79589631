//! Weekly roster filter: which drivers work on a given calendar day.
//!
//! | Contract | Works on (mod 7)                       |
//! |----------|----------------------------------------|
//! | A        | `first_day .. first_day + 5`           |
//! | B        | `first_day` and `first_day + 5`        |

use headway_core::{DAYS_PER_WEEK, DriverId, Weekday};

use crate::DriverStore;

/// Drivers eligible to work on `day`, in ascending ID order.
pub fn roster_for_day(drivers: &DriverStore, day: Weekday) -> Vec<DriverId> {
    drivers
        .iter()
        .filter(|d| d.works_on(day))
        .map(|d| d.id)
        .collect()
}

/// Number of working drivers on each day of the week.
pub fn per_day_driver_counts(drivers: &DriverStore) -> [usize; DAYS_PER_WEEK] {
    let mut counts = [0; DAYS_PER_WEEK];
    for day in Weekday::ALL {
        counts[day.index()] = drivers.iter().filter(|d| d.works_on(day)).count();
    }
    counts
}
