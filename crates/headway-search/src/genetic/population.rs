//! Scored populations and the per-generation breed/clean cycle.

use headway_core::{RosterConfig, RosterError, RosterResult, SearchRng};

use super::{Individual, crossover, mutate, tournament_select};

/// An individual with its cached fitness.
#[derive(Clone, Debug, PartialEq)]
pub struct Scored {
    pub individual: Individual,
    pub fitness:    f64,
}

impl Scored {
    pub fn new(individual: Individual, config: &RosterConfig) -> Self {
        let fitness = individual.fitness(config);
        Self { individual, fitness }
    }
}

/// The current generation for one driver-pool size.
#[derive(Clone, Debug, Default)]
pub struct Population {
    members: Vec<Scored>,
}

impl Population {
    pub fn from_individuals(individuals: Vec<Individual>, config: &RosterConfig) -> Self {
        Self {
            members: individuals.into_iter().map(|i| Scored::new(i, config)).collect(),
        }
    }

    /// `population_size` freshly constructed individuals.
    pub fn initial(pool_size: usize, config: &RosterConfig, rng: &mut SearchRng) -> Self {
        let individuals = (0..config.genetic.population_size)
            .map(|_| Individual::generate(pool_size, config, rng))
            .collect();
        Self::from_individuals(individuals, config)
    }

    #[inline]
    pub fn members(&self) -> &[Scored] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Lowest fitness, first on ties.
    pub fn best(&self) -> Option<&Scored> {
        self.members
            .iter()
            .reduce(|best, next| if next.fitness < best.fitness { next } else { best })
    }

    /// Up to `population_size` children: two tournament winners, crossed
    /// over, then possibly mutated.  Empty when the population is smaller
    /// than the tournament.
    pub fn breed(&self, pool_size: usize, config: &RosterConfig, rng: &mut SearchRng) -> Vec<Individual> {
        let size = config.genetic.tournament_size;
        let mut children = Vec::with_capacity(config.genetic.population_size);
        for _ in 0..config.genetic.population_size {
            let first = tournament_select(&self.members, size, rng);
            let second = tournament_select(&self.members, size, rng);
            let (Some(first), Some(second)) = (first, second) else {
                continue;
            };
            let mut child = crossover(first, second, rng);
            mutate(&mut child, pool_size, config, rng);
            children.push(child);
        }
        children
    }

    /// Keep valid children; replace invalid ones with fresh individuals
    /// until `max_invalid_replacements` is spent, dropping the rest.
    ///
    /// # Errors
    ///
    /// [`RosterError::SearchExhausted`] if nothing survives.
    pub fn cleaned(
        children:   Vec<Individual>,
        pool_size:  usize,
        generation: usize,
        config:     &RosterConfig,
        rng:        &mut SearchRng,
    ) -> RosterResult<Self> {
        let mut replacements_left = config.genetic.max_invalid_replacements;
        let mut survivors = Vec::with_capacity(children.len());

        for child in children {
            if child.is_valid() {
                survivors.push(child);
            } else if replacements_left > 0 {
                replacements_left -= 1;
                survivors.push(Individual::generate(pool_size, config, rng));
            }
        }

        if survivors.is_empty() {
            return Err(RosterError::SearchExhausted { pool_size, generation });
        }
        Ok(Self::from_individuals(survivors, config))
    }
}
