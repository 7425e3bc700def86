//! Virtual simulation clock and the working-hours window.

use chrono::{Duration, NaiveDateTime, NaiveTime};

/// A monotonically increasing virtual clock.
///
/// The clock advances by a fixed number of simulated minutes per tick,
/// independent of how far apart the ticks are in wall-clock time.
///
/// # Examples
///
/// ```
/// use bems_sim::sim::clock::SimClock;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1)
///     .expect("valid date")
///     .and_hms_opt(9, 0, 0)
///     .expect("valid time");
/// let mut clock = SimClock::new(start, 1);
///
/// assert_eq!(clock.advance().format("%H:%M").to_string(), "09:01");
/// assert_eq!(clock.advance().format("%H:%M").to_string(), "09:02");
/// ```
#[derive(Debug, Clone)]
pub struct SimClock {
    now: NaiveDateTime,
    minutes_per_tick: u32,
}

impl SimClock {
    /// Creates a clock at `start` advancing by `minutes_per_tick` each tick.
    ///
    /// # Panics
    ///
    /// Panics if `minutes_per_tick` is zero.
    pub fn new(start: NaiveDateTime, minutes_per_tick: u32) -> Self {
        assert!(minutes_per_tick > 0, "minutes_per_tick must be > 0");
        Self {
            now: start,
            minutes_per_tick,
        }
    }

    /// Returns the current simulated time.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Advances the clock by one tick and returns the new simulated time.
    pub fn advance(&mut self) -> NaiveDateTime {
        self.now += Duration::minutes(i64::from(self.minutes_per_tick));
        self.now
    }
}

/// The daily window during which occupancy and elevated activity are assumed.
///
/// Both boundary instants are outside the window: `contains` is strictly
/// after the start and strictly before the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkingHours {
    /// Creates a working-hours window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is not before `end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        assert!(start < end, "working hours start must be before end");
        Self { start, end }
    }

    /// Returns the window start.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the window end.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns `true` when `time` falls strictly inside the window.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time > self.start && time < self.end
    }
}

impl Default for WorkingHours {
    /// The standard 08:00 to 18:00 office window.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
        }
    }
}
