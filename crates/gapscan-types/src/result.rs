//! Screen result records.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Premarket session summary for a qualifying day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PremarketSummary {
    /// Highest premarket trade price.
    pub high: f64,
    /// Lowest premarket trade price.
    pub low: f64,
    /// Total premarket volume.
    pub volume: f64,
}

/// A labeled derived value, absent when the underlying bars were missing
/// or a window fetch failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Output column label.
    pub label: String,
    /// Value, or `None` when absent.
    pub value: Option<f64>,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub const fn new(label: String, value: Option<f64>) -> Self {
        Self { label, value }
    }
}

/// One qualifying (ticker, day) pair with its derived statistics.
///
/// The fixed columns mirror the daily bar and premarket summary; the
/// `extra` fields carry the profile's window highs/closes, checkpoint
/// opens, and range lows in profile order. A ticker produces at most one
/// result per run when the scan stops at the first qualifying day.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenResult {
    /// The ticker symbol.
    pub ticker: String,
    /// The qualifying trading date.
    pub date: NaiveDate,
    /// Previous session's close.
    pub previous_close: f64,
    /// Qualifying day's open.
    pub open: f64,
    /// Qualifying day's high.
    pub high: f64,
    /// Qualifying day's low.
    pub low: f64,
    /// Qualifying day's close.
    pub close: f64,
    /// Premarket session summary.
    pub premarket: PremarketSummary,
    /// Provider-reported market cap, when available.
    pub given_market_cap: Option<f64>,
    /// Market cap computed as shares outstanding times a reference close,
    /// when the shares lookup succeeded.
    pub calculated_market_cap: Option<f64>,
    /// Window, checkpoint, and range-low fields in profile order.
    pub extra: Vec<Field>,
}

impl ScreenResult {
    /// Labels of the fixed columns, in output order.
    pub const CORE_LABELS: [&'static str; 12] = [
        "Ticker",
        "Date",
        "Previous Close",
        "Open",
        "High",
        "Low",
        "Close",
        "Premarket High",
        "Premarket Low",
        "Premarket Volume",
        "Given Market Cap",
        "Calculated Market Cap",
    ];

    /// Returns the labels of the extra fields, in order.
    pub fn extra_labels(&self) -> impl Iterator<Item = &str> {
        self.extra.iter().map(|f| f.label.as_str())
    }
}

// Serialized as one flat mapping per record so JSON rows mirror the
// spreadsheet columns.
impl Serialize for ScreenResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Self::CORE_LABELS.len() + self.extra.len()))?;
        map.serialize_entry("Ticker", &self.ticker)?;
        map.serialize_entry("Date", &self.date.format("%Y-%m-%d").to_string())?;
        map.serialize_entry("Previous Close", &self.previous_close)?;
        map.serialize_entry("Open", &self.open)?;
        map.serialize_entry("High", &self.high)?;
        map.serialize_entry("Low", &self.low)?;
        map.serialize_entry("Close", &self.close)?;
        map.serialize_entry("Premarket High", &self.premarket.high)?;
        map.serialize_entry("Premarket Low", &self.premarket.low)?;
        map.serialize_entry("Premarket Volume", &self.premarket.volume)?;
        map.serialize_entry("Given Market Cap", &self.given_market_cap)?;
        map.serialize_entry("Calculated Market Cap", &self.calculated_market_cap)?;
        for field in &self.extra {
            map.serialize_entry(&field.label, &field.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ScreenResult {
        ScreenResult {
            ticker: "ABC".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            previous_close: 10.0,
            open: 12.0,
            high: 13.0,
            low: 11.0,
            close: 12.5,
            premarket: PremarketSummary {
                high: 12.2,
                low: 10.1,
                volume: 600_000.0,
            },
            given_market_cap: None,
            calculated_market_cap: Some(1_500_000_000.0),
            extra: vec![
                Field::new("9:30am-9:44am (high)".to_string(), Some(12.8)),
                Field::new("9:30am-9:44am (close)".to_string(), None),
            ],
        }
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["Ticker"], "ABC");
        assert_eq!(json["Date"], "2024-01-15");
        assert_eq!(json["Previous Close"], 10.0);
        assert_eq!(json["Premarket Volume"], 600_000.0);
        assert_eq!(json["9:30am-9:44am (high)"], 12.8);
        assert!(json["9:30am-9:44am (close)"].is_null());
        assert!(json["Given Market Cap"].is_null());
    }

    #[test]
    fn test_extra_labels_in_order() {
        let result = sample_result();
        let labels: Vec<_> = result.extra_labels().collect();
        assert_eq!(
            labels,
            vec!["9:30am-9:44am (high)", "9:30am-9:44am (close)"]
        );
    }
}
