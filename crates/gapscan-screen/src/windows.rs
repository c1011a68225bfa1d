//! Reductions over minute bars within a clock-time window.

use gapscan_types::{Bar, PremarketSummary};

/// Reduces premarket minute bars to their high/low/volume summary.
///
/// Returns `None` for an empty bar set; an empty premarket fails the
/// screen for that day.
#[must_use]
pub fn premarket_summary(bars: &[Bar]) -> Option<PremarketSummary> {
    if bars.is_empty() {
        return None;
    }
    Some(PremarketSummary {
        high: bars.iter().map(|b| b.high).fold(f64::MIN, f64::max),
        low: bars.iter().map(|b| b.low).fold(f64::MAX, f64::min),
        volume: bars.iter().map(|b| b.volume).sum(),
    })
}

/// Highest high across the window, or `None` when no bars returned.
#[must_use]
pub fn window_high(bars: &[Bar]) -> Option<f64> {
    if bars.is_empty() {
        return None;
    }
    Some(bars.iter().map(|b| b.high).fold(f64::MIN, f64::max))
}

/// Last bar's close, or `None` when no bars returned.
#[must_use]
pub fn window_close(bars: &[Bar]) -> Option<f64> {
    bars.last().map(|b| b.close)
}

/// Lowest low across the window, or `None` when no bars returned.
#[must_use]
pub fn range_low(bars: &[Bar]) -> Option<f64> {
    if bars.is_empty() {
        return None;
    }
    Some(bars.iter().map(|b| b.low).fold(f64::MAX, f64::min))
}

/// Open of the single minute bar at a checkpoint instant, or `None` when
/// no bar exists at that exact minute.
#[must_use]
pub fn instant_open(bars: &[Bar]) -> Option<f64> {
    bars.first().map(|b| b.open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_bars(rows: &[(f64, f64, f64, f64, f64)]) -> Vec<Bar> {
        rows.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close, volume))| {
                let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 9, i as u32, 0).unwrap();
                Bar::new(timestamp, open, high, low, close, volume)
            })
            .collect()
    }

    #[test]
    fn test_premarket_summary() {
        let bars = make_bars(&[
            (9.0, 10.0, 8.0, 9.5, 100.0),
            (9.5, 12.0, 7.0, 11.0, 200.0),
            (11.0, 9.0, 11.0, 9.0, 300.0),
        ]);
        let summary = premarket_summary(&bars).unwrap();

        assert!((summary.high - 12.0).abs() < 1e-10);
        assert!((summary.low - 7.0).abs() < 1e-10);
        assert!((summary.volume - 600.0).abs() < 1e-10);
    }

    #[test]
    fn test_premarket_summary_empty() {
        assert!(premarket_summary(&[]).is_none());
    }

    #[test]
    fn test_window_high_and_close() {
        let bars = make_bars(&[
            (10.0, 10.5, 9.8, 10.2, 50.0),
            (10.2, 11.0, 10.0, 10.9, 60.0),
            (10.9, 10.95, 10.4, 10.5, 70.0),
        ]);

        assert!((window_high(&bars).unwrap() - 11.0).abs() < 1e-10);
        assert!((window_close(&bars).unwrap() - 10.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_window_is_absent_not_zero() {
        assert_eq!(window_high(&[]), None);
        assert_eq!(window_close(&[]), None);
        assert_eq!(range_low(&[]), None);
        assert_eq!(instant_open(&[]), None);
    }

    #[test]
    fn test_range_low() {
        let bars = make_bars(&[
            (10.0, 10.5, 9.8, 10.2, 50.0),
            (10.2, 11.0, 9.1, 10.9, 60.0),
            (10.9, 10.95, 10.4, 10.5, 70.0),
        ]);
        assert!((range_low(&bars).unwrap() - 9.1).abs() < 1e-10);
    }

    #[test]
    fn test_instant_open_takes_first_bar() {
        let bars = make_bars(&[(10.0, 10.5, 9.8, 10.2, 50.0), (99.0, 99.0, 99.0, 99.0, 1.0)]);
        assert!((instant_open(&bars).unwrap() - 10.0).abs() < 1e-10);
    }
}
