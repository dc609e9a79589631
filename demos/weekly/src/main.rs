//! weekly: plan a week of bus-driver rosters and a genetic day schedule.
//!
//! Usage: `weekly [config.json] [seed]`
//!
//! Without a config file the built-in defaults are used (20 buses, 4..=20
//! drivers, peaks 07:00-09:00 and 17:00-19:00).  Fields missing from the
//! JSON file keep their defaults; clock times are `"HH:MM"` strings, with
//! hours past 24 meaning the following morning.
//!
//! Set `RUST_LOG=headway_search=debug` to watch every candidate being scored.

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};

use headway_core::{ClockTime, DriverId, RosterConfig, SearchRng, Weekday};
use headway_search::{ExhaustiveOutcome, run_exhaustive_search, run_genetic_search};
use headway_sim::{DispatchObserver, Fleet, RestKind, RosterBuilder, Shift, WaitReason, simulate_week_observed};
use tracing_subscriber::EnvFilter;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SEED:       u64   = 42;
const PREVIEW_DISPATCHES: usize = 12;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tallies the dispatcher's decisions per weekday.
#[derive(Default)]
struct DayTally {
    rostered:  [usize; 7],
    no_driver: [usize; 7],
    no_bus:    [usize; 7],
    breaks:    [usize; 7],
    lunches:   [usize; 7],
}

impl DispatchObserver for DayTally {
    fn on_day_start(&mut self, day: Weekday, rostered: usize) {
        self.rostered[day.index()] = rostered;
    }

    fn on_wait(&mut self, day: Weekday, _now: ClockTime, reason: WaitReason) {
        match reason {
            WaitReason::NoDriver => self.no_driver[day.index()] += 1,
            WaitReason::NoBus => self.no_bus[day.index()] += 1,
        }
    }

    fn on_rest(&mut self, day: Weekday, _driver: DriverId, kind: RestKind, _until: ClockTime) {
        match kind {
            RestKind::Break => self.breaks[day.index()] += 1,
            RestKind::Lunch => self.lunches[day.index()] += 1,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<RosterConfig> {
    let Some(path) = path else {
        return Ok(RosterConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {path}"))?;
    let config: RosterConfig =
        serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn span(shifts: &[Shift]) -> String {
    match (shifts.first(), shifts.last()) {
        (Some(first), Some(last)) => format!("{:#} - {:#}", first.start, last.start),
        _ => "-".to_string(),
    }
}

/// Re-run the winning roster with a tally observer.
fn replay(outcome: &ExhaustiveOutcome, config: &RosterConfig) -> Result<DayTally> {
    let mut drivers = RosterBuilder::new(outcome.type_a, outcome.type_b)
        .first_days(outcome.first_days.clone())
        .build()?;
    let fleet = Fleet::new(config.bus_count);
    let mut tally = DayTally::default();
    let schedule = simulate_week_observed(config, &mut drivers, &fleet, &mut tally)?;
    anyhow::ensure!(schedule == outcome.schedule, "replayed schedule differs from search result");
    Ok(tally)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_config(args.get(1).map(String::as_str))?;
    let seed = match args.get(2) {
        Some(s) => s.parse().with_context(|| format!("seed {s:?} is not an integer"))?,
        None => DEFAULT_SEED,
    };
    config.validate()?;

    println!("=== weekly: headway roster engine ===");
    println!(
        "Buses: {}  |  Drivers: {}..={}  |  Service: {:#} - {:#}  |  Strategy: {:?}",
        config.bus_count,
        config.min_driver_count,
        config.max_driver_count,
        config.service_start,
        config.service_end,
        config.first_day_strategy,
    );
    println!();

    // 1. Exhaustive roster search.
    let t0 = Instant::now();
    let roster = run_exhaustive_search(&config)?;
    println!(
        "Exhaustive search: {} candidates in {:.3} s",
        roster.candidates_evaluated,
        t0.elapsed().as_secs_f64()
    );
    println!(
        "Best roster: {} type A + {} type B  |  loss {:.1} (waiting {:.1}, drivers {:.0}, infeasible days {})",
        roster.type_a,
        roster.type_b,
        roster.loss,
        roster.breakdown.waiting,
        roster.breakdown.drivers,
        roster.breakdown.infeasible_days,
    );
    println!();

    // 2. Per-day table from a replay of the winner.
    let tally = replay(&roster, &config)?;
    println!(
        "{:<4} {:>7} {:>7} {:<15} {:>9} {:>7} {:>7} {:>6}",
        "Day", "Drivers", "Shifts", "Departures", "No driver", "No bus", "Breaks", "Lunch"
    );
    println!("{}", "-".repeat(70));
    for (day, shifts) in roster.schedule.iter() {
        let i = day.index();
        println!(
            "{:<4} {:>7} {:>7} {:<15} {:>9} {:>7} {:>7} {:>6}",
            day.to_string(),
            tally.rostered[i],
            shifts.len(),
            span(shifts),
            tally.no_driver[i],
            tally.no_bus[i],
            tally.breaks[i],
            tally.lunches[i],
        );
    }
    println!();

    // 3. Genetic day schedule.
    let t0 = Instant::now();
    let mut rng = SearchRng::new(seed);
    let genetic = run_genetic_search(&config, &mut rng)?;
    println!(
        "Genetic search (seed {seed}): {:.3} s  |  fitness {:.1}  |  pool {}  |  drivers used {}  |  valid {}",
        t0.elapsed().as_secs_f64(),
        genetic.fitness,
        genetic.pool_size,
        genetic.driver_count,
        genetic.valid,
    );
    println!("{:<8} {:<6}", "Start", "Driver");
    println!("{}", "-".repeat(16));
    for dispatch in genetic.schedule.iter().take(PREVIEW_DISPATCHES) {
        println!("{:<8} {:<6}", format!("{:#}", dispatch.start), dispatch.driver.to_string());
    }
    if genetic.schedule.len() > PREVIEW_DISPATCHES {
        println!("... {} more", genetic.schedule.len() - PREVIEW_DISPATCHES);
    }
    println!();

    // 4. Machine-readable summary.
    let summary = serde_json::json!({
        "roster": {
            "type_a": roster.type_a,
            "type_b": roster.type_b,
            "loss": roster.loss,
            "per_day_driver_count": roster.per_day_driver_count,
        },
        "genetic": {
            "fitness": genetic.fitness,
            "pool_size": genetic.pool_size,
            "dispatches": genetic.schedule.len(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
