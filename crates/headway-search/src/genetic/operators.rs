//! Selection, crossover, and mutation.

use headway_core::{DriverId, RosterConfig, SearchRng};

use super::{Individual, Scored};

/// Sample `size` distinct members and return the fittest (first on ties).
///
/// `None` if the population is smaller than the tournament.
pub fn tournament_select<'p>(population: &'p [Scored], size: usize, rng: &mut SearchRng) -> Option<&'p Individual> {
    if size == 0 || population.len() < size {
        return None;
    }
    rng.sample_indices(population.len(), size)
        .into_iter()
        .map(|i| &population[i])
        .reduce(|best, next| if next.fitness < best.fitness { next } else { best })
        .map(|winner| &winner.individual)
}

/// Single-point crossover: `first[..split] ++ second[split..]` with `split`
/// drawn from `1..first.len()`.
///
/// A first parent with fewer than two dispatches is returned unchanged.
pub fn crossover(first: &Individual, second: &Individual, rng: &mut SearchRng) -> Individual {
    if first.len() < 2 {
        return first.clone();
    }
    let split = rng.gen_range(1..first.len());

    let mut dispatches = first.dispatches[..split].to_vec();
    if let Some(tail) = second.dispatches.get(split..) {
        dispatches.extend_from_slice(tail);
    }
    Individual::new(dispatches)
}

/// With probability `mutation_rate`, pick one dispatch, hand it to a random
/// driver of the pool, and shift its time by a random `mutation_offsets`
/// entry.
pub fn mutate(individual: &mut Individual, pool_size: usize, config: &RosterConfig, rng: &mut SearchRng) {
    if individual.is_empty() || pool_size == 0 || !rng.gen_bool(config.genetic.mutation_rate) {
        return;
    }
    let index = rng.gen_range(0..individual.len());
    let driver = DriverId(rng.gen_range(0..pool_size) as u32);
    let Some(&offset) = rng.choose(&config.genetic.mutation_offsets) else {
        return;
    };

    let gene = &mut individual.dispatches[index];
    gene.driver = driver;
    gene.start = gene.start.shifted(offset);
}
