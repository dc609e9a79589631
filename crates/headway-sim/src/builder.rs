//! Fluent builder for constructing a candidate's [`DriverStore`].

use headway_core::{DriverId, RosterError, RosterResult, Weekday};

use crate::{ContractType, Driver, DriverStore};

/// Fluent builder for [`DriverStore`].
///
/// Type-A drivers get IDs `0..type_a`, type-B drivers follow at
/// `type_a..type_a + type_b`.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                  |
/// |-------------------|--------------------------|
/// | `.first_days(v)`  | Every driver starts Mon  |
///
/// # Example
///
/// ```rust
/// use headway_core::Weekday;
/// use headway_sim::{ContractType, RosterBuilder};
///
/// let store = RosterBuilder::new(2, 1)
///     .first_days(vec![Weekday::new(0), Weekday::new(1), Weekday::new(0)])
///     .build()
///     .unwrap();
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.count_of(ContractType::B), 1);
/// ```
pub struct RosterBuilder {
    type_a:     usize,
    type_b:     usize,
    first_days: Option<Vec<Weekday>>,
}

impl RosterBuilder {
    pub fn new(type_a: usize, type_b: usize) -> Self {
        Self {
            type_a,
            type_b,
            first_days: None,
        }
    }

    /// Supply one first working day per driver, in ID order (all type A,
    /// then all type B).
    pub fn first_days(mut self, first_days: Vec<Weekday>) -> Self {
        self.first_days = Some(first_days);
        self
    }

    /// Validate inputs and return the populated store.
    pub fn build(self) -> RosterResult<DriverStore> {
        let count = self.type_a + self.type_b;

        let first_days = match self.first_days {
            Some(days) => {
                if days.len() != count {
                    return Err(RosterError::InvalidConfiguration(format!(
                        "first_days length {} does not match driver count {count}",
                        days.len()
                    )));
                }
                days
            }
            None => vec![Weekday::default(); count],
        };

        let drivers = first_days
            .into_iter()
            .enumerate()
            .map(|(i, first_day)| {
                let id = DriverId::try_from(i).map_err(|_| {
                    RosterError::InvalidConfiguration(format!("driver count {count} overflows DriverId"))
                })?;
                let contract = if i < self.type_a { ContractType::A } else { ContractType::B };
                Ok(Driver::new(id, contract, first_day))
            })
            .collect::<RosterResult<Vec<_>>>()?;

        Ok(DriverStore::from_drivers(drivers))
    }
}
