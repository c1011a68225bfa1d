//! Exchange-local clock-time windows.
//!
//! Screen windows are defined as wall-clock times in the exchange's civil
//! timezone (premarket 4:00am, opening range 9:30am, and so on). Converting
//! a wall-clock time on a given trading date to a UTC instant must go
//! through a real timezone lookup so that window boundaries stay correct
//! across daylight-saving transitions.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The exchange's civil timezone (NASDAQ and NYSE both trade on New York
/// local time).
pub const MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Formats a wall-clock time as a compact 12-hour label, e.g. "9:30am".
#[must_use]
pub fn wallclock_label(time: NaiveTime) -> String {
    use chrono::Timelike;

    let (hour24, minute) = (time.hour(), time.minute());
    let (hour12, suffix) = match hour24 {
        0 => (12, "am"),
        1..=11 => (hour24, "am"),
        12 => (12, "pm"),
        _ => (hour24 - 12, "pm"),
    };
    format!("{hour12}:{minute:02}{suffix}")
}

/// Resolves a wall-clock time on a date to a UTC instant.
///
/// Ambiguous local times (the autumn fall-back hour) resolve to the earlier
/// instant. Nonexistent local times (the spring-forward gap) resolve to
/// `None`; callers treat the window as absent for that day.
fn localize(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    match MARKET_TZ.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// A clock-time window on a trading day, interpreted in [`MARKET_TZ`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Display label, e.g. "9:30am-9:44am".
    label: String,
    /// Window start (inclusive).
    start: NaiveTime,
    /// Window end (inclusive).
    end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window from start/end hour and minute, labeled from the
    /// times themselves.
    ///
    /// # Panics
    ///
    /// Panics if the hour/minute pairs are not valid clock times.
    #[must_use]
    pub fn from_hm(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Self {
        let start = NaiveTime::from_hms_opt(start_hour, start_min, 0).expect("valid start time");
        let end = NaiveTime::from_hms_opt(end_hour, end_min, 0).expect("valid end time");
        let label = format!("{}-{}", wallclock_label(start), wallclock_label(end));
        Self { label, start, end }
    }

    /// The premarket session: 4:00:00am through 9:29:59am exchange time.
    #[must_use]
    pub fn premarket() -> Self {
        Self {
            label: "premarket 4:00am-9:29am".to_string(),
            start: NaiveTime::from_hms_opt(4, 0, 0).expect("valid time"),
            end: NaiveTime::from_hms_opt(9, 29, 59).expect("valid time"),
        }
    }

    /// Returns the window label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column label for the window high.
    #[must_use]
    pub fn high_label(&self) -> String {
        format!("{} (high)", self.label)
    }

    /// Column label for the window close.
    #[must_use]
    pub fn close_label(&self) -> String {
        format!("{} (close)", self.label)
    }

    /// Column label for the window low.
    #[must_use]
    pub fn low_label(&self) -> String {
        format!("LOW {}", self.label)
    }

    /// Resolves the window to UTC epoch-millisecond bounds on the given
    /// trading date.
    ///
    /// Returns `None` when either boundary falls in a nonexistent local
    /// time (daylight-saving spring-forward gap).
    #[must_use]
    pub fn bounds_ms(&self, date: NaiveDate) -> Option<(i64, i64)> {
        let start = localize(date, self.start)?;
        let end = localize(date, self.end)?;
        Some((start.timestamp_millis(), end.timestamp_millis()))
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A single-instant wall-clock checkpoint whose minute bar's open is
/// sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// The wall-clock minute to sample.
    at: NaiveTime,
}

impl Checkpoint {
    /// Creates a checkpoint at the given hour and minute.
    ///
    /// # Panics
    ///
    /// Panics if the hour/minute pair is not a valid clock time.
    #[must_use]
    pub fn from_hm(hour: u32, min: u32) -> Self {
        Self {
            at: NaiveTime::from_hms_opt(hour, min, 0).expect("valid checkpoint time"),
        }
    }

    /// Column label for the sampled open, e.g. "11:30am (open)".
    #[must_use]
    pub fn open_label(&self) -> String {
        format!("{} (open)", wallclock_label(self.at))
    }

    /// Resolves the checkpoint to a UTC epoch-millisecond instant on the
    /// given trading date.
    #[must_use]
    pub fn instant_ms(&self, date: NaiveDate) -> Option<i64> {
        localize(date, self.at).map(|dt| dt.timestamp_millis())
    }
}

impl std::fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", wallclock_label(self.at))
    }
}
