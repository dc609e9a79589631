//! Unit tests for headway-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BusId, DriverId};

    #[test]
    fn index_roundtrip() {
        let id = DriverId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DriverId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(DriverId(7).to_string(), "D7");
        assert_eq!(BusId(3).to_string(), "B3");
    }
}

#[cfg(test)]
mod time {
    use crate::{ClockTime, PeakWindow, Weekday};

    #[test]
    fn clock_arithmetic() {
        let t = ClockTime::from_hm(6, 0);
        assert_eq!(t.minutes(), 360);
        assert_eq!(t + 60, ClockTime::from_hm(7, 0));
        assert_eq!(ClockTime::from_hm(7, 30) - t, 90);
        assert_eq!(t - ClockTime::from_hm(7, 30), -90);
        assert_eq!(t.since(ClockTime::from_hm(7, 0)), 0);
        assert_eq!(ClockTime(3).shifted(-5), ClockTime::MIDNIGHT);
    }

    #[test]
    fn huge_offsets_saturate() {
        let late = ClockTime::from_hm(26, 0);
        assert_eq!(late + u32::MAX, ClockTime(u32::MAX));
        assert_eq!(late.offset(u32::MAX - 1), ClockTime(u32::MAX));
    }

    #[test]
    fn next_day_display() {
        let t = ClockTime::from_hm(27, 5);
        assert!(t.is_next_day());
        assert_eq!(t.to_string(), "03:05");
        assert_eq!(format!("{t:#}"), "27:05");
    }

    #[test]
    fn parse() {
        assert_eq!("07:30".parse::<ClockTime>().unwrap(), ClockTime::from_hm(7, 30));
        assert_eq!("27:00".parse::<ClockTime>().unwrap(), ClockTime::from_hm(27, 0));
        assert!("7".parse::<ClockTime>().is_err());
        assert!("07:60".parse::<ClockTime>().is_err());
        assert!("48:00".parse::<ClockTime>().is_err());
    }

    #[test]
    fn weekday_wraps() {
        assert_eq!(Weekday::new(9), Weekday::new(2));
        assert_eq!(Weekday::new(4).offset(5), Weekday::new(2));
        assert_eq!(Weekday::new(5).days_until(Weekday::new(1)), 3);
        assert_eq!(Weekday::new(6).to_string(), "Sun");
    }

    #[test]
    fn peak_window_is_half_open() {
        let w = PeakWindow::new(ClockTime::from_hm(7, 0), ClockTime::from_hm(9, 0));
        assert!(!w.contains(ClockTime::from_hm(6, 59)));
        assert!(w.contains(ClockTime::from_hm(7, 0)));
        assert!(w.contains(ClockTime::from_hm(8, 59)));
        assert!(!w.contains(ClockTime::from_hm(9, 0)));
    }
}

#[cfg(test)]
mod config {
    use crate::{ClockTime, PeakWindow, RosterConfig, RosterError};

    #[test]
    fn defaults_are_valid() {
        let cfg = RosterConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.driver_count_range(), 4..=20);
        assert_eq!(cfg.genetic_pool_range(), 10..=20);
    }

    #[test]
    fn rejects_zero_buses() {
        let cfg = RosterConfig { bus_count: 0, ..RosterConfig::default() };
        assert!(matches!(cfg.validate(), Err(RosterError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_zero_route_duration() {
        let cfg = RosterConfig { route_duration_mins: 0, ..RosterConfig::default() };
        assert!(matches!(cfg.validate(), Err(RosterError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_empty_driver_range() {
        let cfg = RosterConfig { min_driver_count: 5, max_driver_count: 4, ..RosterConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = RosterConfig { min_driver_count: 0, ..RosterConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_peak_window() {
        let mut cfg = RosterConfig::default();
        cfg.peak_windows.push(PeakWindow::new(ClockTime::from_hm(12, 0), ClockTime::from_hm(11, 0)));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_mutation_rate() {
        let mut cfg = RosterConfig::default();
        cfg.genetic.mutation_rate = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_genetic_settings() {
        let mut cfg = RosterConfig::default();
        cfg.genetic.generations = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = RosterConfig::default();
        cfg.genetic.dispatch_increments = vec![5, 0];
        assert!(cfg.validate().is_err());

        let mut cfg = RosterConfig::default();
        cfg.genetic.mutation_offsets.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn thresholds_switch_on_peak() {
        let cfg = RosterConfig::default();
        assert_eq!(cfg.max_wait_at(ClockTime::from_hm(7, 30)), 10);
        assert_eq!(cfg.max_wait_at(ClockTime::from_hm(12, 0)), 20);
        assert_eq!(cfg.max_wait_at(ClockTime::from_hm(24 + 8, 0)), 20);
    }

    #[test]
    fn anticipation_looks_one_route_ahead() {
        let mut cfg = RosterConfig::default();
        let before_rush = ClockTime::from_hm(6, 30);
        assert_eq!(cfg.polling_interval_at(before_rush), 20);
        cfg.anticipate_peaks = true;
        assert_eq!(cfg.polling_interval_at(before_rush), 10);
        // The headway threshold itself does not anticipate.
        assert_eq!(cfg.max_wait_at(before_rush), 20);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_partial_json() {
        let json = r#"{
            "bus_count": 8,
            "peak_windows": [{ "start": "06:30", "end": "09:30" }],
            "service_end": "25:00",
            "genetic": { "generations": 5 }
        }"#;
        let cfg: RosterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.bus_count, 8);
        assert_eq!(cfg.peak_windows[0].start, ClockTime::from_hm(6, 30));
        assert_eq!(cfg.service_end, ClockTime::from_hm(25, 0));
        assert_eq!(cfg.genetic.generations, 5);
        assert_eq!(cfg.genetic.population_size, 20);
        assert_eq!(cfg.route_duration_mins, 60);
    }
}

#[cfg(test)]
mod rng {
    use crate::SearchRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SearchRng::new(12345);
        let mut r2 = SearchRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.random();
            let b: u64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_are_reproducible_and_distinct() {
        let mut root1 = SearchRng::new(9);
        let mut root2 = SearchRng::new(9);
        let mut a0 = root1.child(0);
        let mut a1 = root1.child(1);
        let mut b0 = root2.child(0);
        let x: u64 = a0.random();
        assert_eq!(x, b0.random::<u64>());
        assert_ne!(x, a1.random::<u64>());
    }

    #[test]
    fn sample_indices_are_distinct() {
        let mut rng = SearchRng::new(0);
        for _ in 0..100 {
            let mut idx = rng.sample_indices(5, 3);
            idx.sort_unstable();
            idx.dedup();
            assert_eq!(idx.len(), 3);
            assert!(idx.iter().all(|&i| i < 5));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SearchRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
