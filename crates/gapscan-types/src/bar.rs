//! Aggregate bar representation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::window::MARKET_TZ;

/// An aggregate OHLCV bar.
///
/// The same shape serves daily and minute granularity; the provider returns
/// both as open/high/low/close/volume records with a UTC timestamp marking
/// the start of the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar start time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume during the period.
    pub volume: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the trading date of this bar in the exchange's local timezone.
    ///
    /// Daily bars are stamped at the session start in exchange time, so the
    /// calendar date must be read in that timezone rather than UTC (a 20:00
    /// local stamp is already the next day in UTC).
    #[must_use]
    pub fn market_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&MARKET_TZ).date_naive()
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bar_range() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let bar = Bar::new(timestamp, 10.0, 12.5, 9.5, 11.0, 1000.0);
        assert!((bar.range() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_market_date_crosses_utc_midnight() {
        // 2024-01-15 20:00 New York == 2024-01-16 01:00 UTC. The trading
        // date is still January 15.
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 16, 1, 0, 0).unwrap();
        let bar = Bar::new(timestamp, 10.0, 10.0, 10.0, 10.0, 0.0);
        assert_eq!(
            bar.market_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_market_date_plain() {
        // Midday UTC is the same calendar day in New York.
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
        let bar = Bar::new(timestamp, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(
            bar.market_date(),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
        );
    }
}
