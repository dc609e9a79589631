//! Unit tests for headway-search.

use headway_core::{ClockTime, DriverId, FirstDayStrategy, RosterConfig, RosterError, SearchRng, Weekday};
use headway_sim::WeeklySchedule;
use rustc_hash::FxHashMap;

use crate::*;

fn hm(h: u32, m: u32) -> ClockTime {
    ClockTime::from_hm(h, m)
}

fn small_config(min: usize, max: usize) -> RosterConfig {
    RosterConfig {
        min_driver_count: min,
        max_driver_count: max,
        ..RosterConfig::default()
    }
}

/// Every driver's consecutive departures within a day are at least one
/// route apart.
fn respects_route_gap(schedule: &WeeklySchedule, route: u32) -> bool {
    schedule.iter().all(|(_, shifts)| {
        let mut last: FxHashMap<DriverId, ClockTime> = FxHashMap::default();
        shifts.iter().all(|s| match last.insert(s.driver, s.start) {
            Some(prev) => s.start - prev >= i64::from(route),
            None => true,
        })
    })
}

const MON: Weekday = Weekday::new(0);
const TUE: Weekday = Weekday::new(1);
const WED: Weekday = Weekday::new(2);

// ── Candidate enumeration ─────────────────────────────────────────────────────

#[cfg(test)]
mod candidate_tests {
    use super::*;

    #[test]
    fn distributed_spreads_type_a_and_alternates_type_b() {
        assert_eq!(
            distributed_first_days(5, 3),
            vec![MON, MON, MON, TUE, WED, MON, TUE, MON]
        );
    }

    #[test]
    fn distributed_small_splits() {
        assert!(distributed_first_days(0, 0).is_empty());
        assert_eq!(distributed_first_days(1, 0), vec![MON]);
        assert_eq!(distributed_first_days(2, 0), vec![MON, TUE]);
        assert_eq!(distributed_first_days(0, 2), vec![MON, TUE]);
    }

    #[test]
    fn assignments_count_up_like_an_odometer() {
        let all: Vec<_> = FirstDayAssignments::new(2).collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], vec![MON, MON]);
        assert_eq!(all[1], vec![MON, TUE]);
        assert_eq!(all[3], vec![TUE, MON]);
        assert_eq!(all[8], vec![WED, WED]);
    }

    #[test]
    fn zero_drivers_have_one_empty_assignment() {
        let all: Vec<_> = FirstDayAssignments::new(0).collect();
        assert_eq!(all, vec![Vec::<Weekday>::new()]);
    }

    #[test]
    fn distributed_enumeration_order() {
        let candidates: Vec<_> = enumerate_candidates(&small_config(3, 4)).collect();
        let splits: Vec<_> = candidates.iter().map(|c| (c.type_a, c.type_b)).collect();
        assert_eq!(
            splits,
            vec![(0, 3), (1, 2), (2, 1), (3, 0), (0, 4), (1, 3), (2, 2), (3, 1), (4, 0)]
        );
        assert!(candidates.iter().enumerate().all(|(i, c)| c.index == i));
        assert!(candidates.iter().all(|c| c.first_days.len() == c.driver_count()));
    }

    #[test]
    fn exhaustive_enumeration_size() {
        let config = RosterConfig {
            first_day_strategy: FirstDayStrategy::Exhaustive,
            ..small_config(2, 2)
        };
        // 3 splits × 3² first-day plans.
        assert_eq!(enumerate_candidates(&config).count(), 27);
    }

    #[test]
    fn candidate_builds_store_in_id_order() {
        let candidate = RosterCandidate {
            index:      0,
            type_a:     2,
            type_b:     1,
            first_days: vec![TUE, WED, MON],
        };
        let store = candidate.build_store().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(DriverId(1)).first_day, WED);
    }
}

// ── Exhaustive search ─────────────────────────────────────────────────────────

#[cfg(test)]
mod exhaustive_tests {
    use super::*;

    #[test]
    fn finds_a_roster_for_small_ranges() {
        let config = small_config(4, 4);
        let outcome = run_exhaustive_search(&config).unwrap();

        assert_eq!(outcome.driver_count(), 4);
        assert_eq!(outcome.candidates_evaluated, 5);
        assert!(outcome.schedule.total_shifts() > 0);
        assert!(outcome.loss.is_finite());
        assert_eq!(outcome.first_days.len(), 4);
    }

    #[test]
    fn reported_loss_matches_the_schedule() {
        let config = small_config(4, 6);
        let outcome = run_exhaustive_search(&config).unwrap();

        let rescored = headway_sim::weekly_loss(&outcome.schedule, outcome.driver_count(), &config);
        assert_eq!(rescored, outcome.breakdown);
        assert_eq!(outcome.loss, outcome.breakdown.total);
        assert_eq!(
            outcome.per_day_driver_count.iter().filter(|&&n| n == 0).count(),
            outcome.breakdown.infeasible_days
        );
    }

    #[test]
    fn repeated_runs_agree() {
        let config = small_config(4, 6);
        let a = run_exhaustive_search(&config).unwrap();
        let b = run_exhaustive_search(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn winning_schedule_is_physically_consistent() {
        let config = small_config(4, 6);
        let outcome = run_exhaustive_search(&config).unwrap();
        assert!(outcome.schedule.is_time_ordered());
        assert!(respects_route_gap(&outcome.schedule, config.route_duration_mins));
    }

    #[test]
    fn every_first_day_plan_is_at_least_as_good_as_the_spread() {
        let distributed = small_config(3, 3);
        let exhaustive = RosterConfig {
            first_day_strategy: FirstDayStrategy::Exhaustive,
            ..distributed.clone()
        };
        let d = run_exhaustive_search(&distributed).unwrap();
        let e = run_exhaustive_search(&exhaustive).unwrap();
        assert_eq!(e.candidates_evaluated, 4 * 27);
        assert!(e.loss <= d.loss);
    }

    #[test]
    fn rejects_an_empty_fleet() {
        let config = RosterConfig {
            bus_count: 0,
            ..small_config(4, 4)
        };
        assert!(matches!(
            run_exhaustive_search(&config),
            Err(RosterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_an_empty_driver_range() {
        let config = small_config(5, 4);
        assert!(matches!(
            run_exhaustive_search(&config),
            Err(RosterError::InvalidConfiguration(_))
        ));
    }

    /// One bus, no peaks, a two-hour day: every worked day departs at 06:00
    /// and 07:00 and costs (60 - 20)² = 1600.
    fn two_hour_config() -> RosterConfig {
        RosterConfig {
            bus_count: 1,
            service_end: hm(8, 0),
            peak_windows: Vec::new(),
            ..small_config(1, 2)
        }
    }

    #[test]
    fn two_hour_day_has_a_known_winner() {
        let config = two_hour_config();
        let outcome = run_exhaustive_search(&config).unwrap();

        // (1, 1) and (2, 0) both cover Mon..Sat; the earlier candidate wins.
        assert_eq!((outcome.type_a, outcome.type_b), (1, 1));
        assert_eq!(outcome.first_days, vec![MON, MON]);
        assert_eq!(outcome.candidates_evaluated, 5);
        assert_eq!(outcome.per_day_driver_count, [2, 1, 1, 1, 1, 1, 0]);
        assert_eq!(outcome.breakdown.infeasible_days, 1);
        assert_eq!(outcome.breakdown.waiting, 6.0 * 1600.0 + headway_sim::INFEASIBLE_DAY_PENALTY);
        assert_eq!(outcome.breakdown.drivers, 4.0);
        assert_eq!(outcome.loss, 40_000_960_020.0);
        for (_, shifts) in outcome.schedule.iter().take(6) {
            let starts: Vec<ClockTime> = shifts.iter().map(|s| s.start).collect();
            assert_eq!(starts, vec![hm(6, 0), hm(7, 0)]);
        }
    }

    #[test]
    fn search_matches_a_sequential_scan() {
        let config = small_config(4, 6);
        let fleet = headway_sim::Fleet::new(config.bus_count);
        let expected = enumerate_candidates(&config)
            .map(|c| evaluate_candidate(c, &fleet, &config).unwrap())
            .min_by(|a, b| {
                a.breakdown
                    .total
                    .total_cmp(&b.breakdown.total)
                    .then(a.candidate.index.cmp(&b.candidate.index))
            })
            .unwrap();

        let outcome = run_exhaustive_search(&config).unwrap();
        assert_eq!(outcome.first_days, expected.candidate.first_days);
        assert_eq!((outcome.type_a, outcome.type_b), (expected.candidate.type_a, expected.candidate.type_b));
        assert_eq!(outcome.loss, expected.breakdown.total);
        assert_eq!(outcome.schedule, expected.schedule);
    }
}

// ── Genetic individuals ───────────────────────────────────────────────────────

#[cfg(test)]
mod individual_tests {
    use super::*;

    fn d(driver: u32, h: u32, m: u32) -> Dispatch {
        Dispatch {
            driver: DriverId(driver),
            start:  hm(h, m),
        }
    }

    #[test]
    fn constructed_sequences_are_valid_and_ordered() {
        let config = RosterConfig::default();
        for seed in 0..20 {
            let mut rng = SearchRng::new(seed);
            let ind = Individual::generate(5, &config, &mut rng);

            assert!(ind.is_valid(), "seed {seed}");
            assert!(ind.dispatches.windows(2).all(|w| w[0].start <= w[1].start));
            assert!(ind.dispatches.iter().all(|x| x.start >= config.service_start));
            assert!(ind.dispatches.iter().all(|x| x.start < config.service_end));
            assert!(ind.dispatches.iter().all(|x| x.driver.index() < 5));
        }
    }

    #[test]
    fn empty_pool_builds_nothing() {
        let mut rng = SearchRng::new(1);
        let ind = Individual::generate(0, &RosterConfig::default(), &mut rng);
        assert!(ind.is_empty());
        assert!(!ind.is_valid());
    }

    #[test]
    fn validity_needs_an_hour_between_a_drivers_departures() {
        assert!(Individual::new(vec![d(0, 6, 0), d(1, 6, 30), d(0, 7, 0)]).is_valid());
        assert!(!Individual::new(vec![d(0, 6, 0), d(0, 6, 59)]).is_valid());
        assert!(!Individual::new(vec![d(0, 8, 0), d(0, 7, 0)]).is_valid());
        assert!(!Individual::default().is_valid());
    }

    #[test]
    fn fitness_adds_headway_excess_and_driver_count() {
        let config = RosterConfig::default();
        assert_eq!(Individual::default().fitness(&config), EMPTY_SCHEDULE_FITNESS);

        // Off-peak: 30 min gap against a 15 min target, two drivers.
        let off_peak = Individual::new(vec![d(0, 10, 0), d(1, 10, 30)]);
        assert_eq!(off_peak.fitness(&config), 225.0 + 4.0);

        // Peak: 10 min gap against a 5 min target, one driver.
        let peak = Individual::new(vec![d(0, 7, 0), d(0, 7, 10)]);
        assert_eq!(peak.fitness(&config), 25.0 + 1.0);
    }

    #[test]
    fn driver_count_is_distinct_drivers() {
        let ind = Individual::new(vec![d(0, 6, 0), d(2, 6, 10), d(0, 7, 0)]);
        assert_eq!(ind.driver_count(), 2);
    }
}

// ── Genetic operators ─────────────────────────────────────────────────────────

#[cfg(test)]
mod operator_tests {
    use super::*;

    fn uniform(driver: u32, len: usize) -> Individual {
        Individual::new(
            (0..len)
                .map(|i| Dispatch {
                    driver: DriverId(driver),
                    start:  hm(6, 0) + (i as u32) * 10,
                })
                .collect(),
        )
    }

    #[test]
    fn crossover_takes_a_prefix_and_the_matching_suffix() {
        let first = uniform(0, 4);
        let second = uniform(1, 6);
        for seed in 0..20 {
            let mut rng = SearchRng::new(seed);
            let child = crossover(&first, &second, &mut rng);

            assert_eq!(child.len(), 6);
            let split = child.dispatches.iter().take_while(|x| x.driver == DriverId(0)).count();
            assert!((1..4).contains(&split), "split {split}");
            assert_eq!(child.dispatches[..split], first.dispatches[..split]);
            assert_eq!(child.dispatches[split..], second.dispatches[split..]);
        }
    }

    #[test]
    fn crossover_keeps_a_short_first_parent() {
        let first = uniform(0, 1);
        let second = uniform(1, 5);
        let mut rng = SearchRng::new(3);
        assert_eq!(crossover(&first, &second, &mut rng), first);
    }

    #[test]
    fn mutation_rewrites_one_gene() {
        let mut config = RosterConfig::default();
        config.genetic.mutation_rate = 1.0;
        let original = Individual::new(
            (0..5)
                .map(|i| Dispatch {
                    driver: DriverId(0),
                    start:  hm(12, 0) + i * 20,
                })
                .collect(),
        );

        for seed in 0..20 {
            let mut rng = SearchRng::new(seed);
            let mut mutant = original.clone();
            mutate(&mut mutant, 4, &config, &mut rng);

            let changed: Vec<_> = original
                .dispatches
                .iter()
                .zip(&mutant.dispatches)
                .filter(|(a, b)| a != b)
                .collect();
            assert_eq!(changed.len(), 1);
            let (before, after) = changed[0];
            assert!([-5, 5, 10].contains(&(after.start - before.start)));
            assert!(after.driver.index() < 4);
        }
    }

    #[test]
    fn zero_mutation_rate_is_identity() {
        let mut config = RosterConfig::default();
        config.genetic.mutation_rate = 0.0;
        let original = uniform(0, 5);
        let mut mutant = original.clone();
        mutate(&mut mutant, 4, &config, &mut SearchRng::new(9));
        assert_eq!(mutant, original);
    }

    #[test]
    fn tournament_needs_enough_entrants() {
        let config = RosterConfig::default();
        let population = Population::from_individuals(vec![uniform(0, 2), uniform(1, 2)], &config);
        let mut rng = SearchRng::new(0);
        assert!(tournament_select(population.members(), 3, &mut rng).is_none());
    }

    #[test]
    fn full_tournament_picks_the_fittest() {
        let config = RosterConfig::default();
        // 10 min off-peak gaps cost nothing; a one-hour gap costs 45².
        let late = Individual::new(vec![
            Dispatch { driver: DriverId(0), start: hm(6, 0) },
            Dispatch { driver: DriverId(1), start: hm(7, 0) },
        ]);
        let population =
            Population::from_individuals(vec![Individual::default(), late, uniform(0, 3)], &config);
        let mut rng = SearchRng::new(0);
        let winner = tournament_select(population.members(), 3, &mut rng).unwrap();
        assert_eq!(Some(winner), population.best().map(|s| &s.individual));
        assert_ne!(winner, &Individual::default());
    }
}

// ── Genetic search ────────────────────────────────────────────────────────────

#[cfg(test)]
mod genetic_tests {
    use super::*;

    fn quick_config() -> RosterConfig {
        let mut config = RosterConfig {
            bus_count: 4,
            ..RosterConfig::default()
        };
        config.genetic.generations = 5;
        config.genetic.population_size = 8;
        config
    }

    #[test]
    fn cleaning_replaces_a_bounded_number_of_invalid_children() {
        let mut config = quick_config();
        config.genetic.max_invalid_replacements = 1;
        let invalid = Individual::default();
        let mut rng = SearchRng::new(4);

        let cleaned =
            Population::cleaned(vec![invalid.clone(), invalid.clone(), invalid], 3, 0, &config, &mut rng)
                .unwrap();
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.members()[0].individual.is_valid());
    }

    #[test]
    fn cleaning_with_no_survivors_is_exhaustion() {
        let mut config = quick_config();
        config.genetic.max_invalid_replacements = 0;
        let mut rng = SearchRng::new(4);

        let result = Population::cleaned(vec![Individual::default()], 3, 7, &config, &mut rng);
        assert_eq!(
            result.err(),
            Some(RosterError::SearchExhausted { pool_size: 3, generation: 7 })
        );
    }

    #[test]
    fn same_seed_same_outcome() {
        let config = quick_config();
        let a = run_genetic_search(&config, &mut SearchRng::new(42)).unwrap();
        let b = run_genetic_search(&config, &mut SearchRng::new(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn outcome_is_consistent_with_its_schedule() {
        let config = quick_config();
        let outcome = run_genetic_search(&config, &mut SearchRng::new(7)).unwrap();

        assert!(config.genetic_pool_range().contains(&outcome.pool_size));
        assert!(!outcome.schedule.is_empty());
        let ind = Individual::new(outcome.schedule.clone());
        assert_eq!(ind.fitness(&config), outcome.fitness);
        assert_eq!(ind.is_valid(), outcome.valid);
        assert_eq!(ind.driver_count(), outcome.driver_count);
        assert!(outcome.driver_count <= outcome.pool_size);
    }

    #[test]
    fn every_pool_reports_its_generations() {
        let config = quick_config();
        let result = optimize_pool(3, &config, &mut SearchRng::new(1));
        assert_eq!(result.pool_size, 3);
        assert_eq!(result.generations, 5);
        assert_eq!(result.exhausted_at, None);
        assert!(result.best.is_some());
    }

    #[test]
    fn undersized_population_dies_out() {
        let mut config = quick_config();
        config.genetic.population_size = 2;
        let result = run_genetic_search(&config, &mut SearchRng::new(5));
        assert_eq!(
            result.err(),
            Some(RosterError::SearchExhausted { pool_size: 2, generation: 0 })
        );
    }

    #[test]
    fn rejects_zero_generations() {
        let mut config = quick_config();
        config.genetic.generations = 0;
        assert!(matches!(
            run_genetic_search(&config, &mut SearchRng::new(0)),
            Err(RosterError::InvalidConfiguration(_))
        ));
    }
}
