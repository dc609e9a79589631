//! Service-day time model.
//!
//! # Design
//!
//! A service day starts in the morning and runs past midnight, so time is the
//! number of whole minutes since 00:00 of the day the service started:
//!
//!   06:00 → 360,   23:59 → 1439,   03:00 next day → 1620
//!
//! Using an integer minute as the canonical unit keeps every headway exact
//! and keeps "03:00 tomorrow" ordered after "23:00 today" without a date.
//! Weekdays are handled separately by [`Weekday`].

use std::fmt;
use std::str::FromStr;

use crate::RosterError;

pub const MINUTES_PER_DAY: u32 = 1_440;
pub const DAYS_PER_WEEK: usize = 7;

// ── ClockTime ─────────────────────────────────────────────────────────────────

/// Minutes since 00:00 of the service day.  Values of 1440 and above fall on
/// the next calendar day.
///
/// `Display` prints the wall clock (`03:00`); the alternate form (`{:#}`)
/// prints the service-day form (`27:00`), which is also what `FromStr` and
/// serde accept.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ClockTime(pub u32);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    #[inline]
    pub const fn from_hm(hours: u32, minutes: u32) -> ClockTime {
        ClockTime(hours * 60 + minutes)
    }

    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// The time `mins` minutes after `self`, saturating at `u32::MAX`.
    #[inline]
    pub fn offset(self, mins: u32) -> ClockTime {
        ClockTime(self.0.saturating_add(mins))
    }

    /// Shift by a signed number of minutes, clamping at midnight.
    #[inline]
    pub fn shifted(self, delta_mins: i32) -> ClockTime {
        ClockTime(self.0.saturating_add_signed(delta_mins))
    }

    /// Whole minutes elapsed from `earlier` to `self`; zero if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: ClockTime) -> u32 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` once the time has rolled past midnight into the next day.
    #[inline]
    pub fn is_next_day(self) -> bool {
        self.0 >= MINUTES_PER_DAY
    }

    /// Wall-clock `(hour, minute)`, ignoring the day rollover.
    pub fn wall_clock(self) -> (u32, u32) {
        let m = self.0 % MINUTES_PER_DAY;
        (m / 60, m % 60)
    }
}

impl std::ops::Add<u32> for ClockTime {
    type Output = ClockTime;
    #[inline]
    fn add(self, rhs: u32) -> ClockTime {
        self.offset(rhs)
    }
}

/// Signed difference in minutes (`later - earlier`).
impl std::ops::Sub for ClockTime {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: ClockTime) -> i64 {
        self.0 as i64 - rhs.0 as i64
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
        } else {
            let (h, m) = self.wall_clock();
            write!(f, "{h:02}:{m:02}")
        }
    }
}

impl FromStr for ClockTime {
    type Err = RosterError;

    /// Parse `"HH:MM"`.  Hours up to 47 are accepted so that post-midnight
    /// service can be written as `"27:00"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RosterError::Parse(format!("expected HH:MM, got {s:?}"));
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        let hours: u32 = h.parse().map_err(|_| bad())?;
        let minutes: u32 = m.parse().map_err(|_| bad())?;
        if hours >= 48 || minutes >= 60 {
            return Err(bad());
        }
        Ok(ClockTime::from_hm(hours, minutes))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = RosterError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> String {
        format!("{t:#}")
    }
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Calendar day of the roster week, `0 = Monday … 6 = Sunday`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weekday(u8);

impl Weekday {
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday(0),
        Weekday(1),
        Weekday(2),
        Weekday(3),
        Weekday(4),
        Weekday(5),
        Weekday(6),
    ];

    const NAMES: [&'static str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    /// Day `n` of the week, wrapping modulo 7.
    #[inline]
    pub const fn new(n: usize) -> Weekday {
        Weekday((n % DAYS_PER_WEEK) as u8)
    }

    /// The weekday `days` after `self`, wrapping into the next week.
    #[inline]
    pub const fn offset(self, days: usize) -> Weekday {
        Weekday::new(self.0 as usize + days)
    }

    /// Days from `self` forward to `other` (0..=6).
    #[inline]
    pub const fn days_until(self, other: Weekday) -> usize {
        (other.0 as usize + DAYS_PER_WEEK - self.0 as usize) % DAYS_PER_WEEK
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAMES[self.index()])
    }
}

// ── PeakWindow ────────────────────────────────────────────────────────────────

/// A half-open `[start, end)` stretch of the service day with a tighter
/// headway policy.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakWindow {
    pub start: ClockTime,
    pub end:   ClockTime,
}

impl PeakWindow {
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, t: ClockTime) -> bool {
        self.start <= t && t < self.end
    }
}
