//! The scan engine: drives a market-data provider over a ticker universe.

use chrono::NaiveDate;
use gapscan_client::MarketData;
use gapscan_types::{Bar, DateRange, Field, ScreenResult, TimeWindow};

use crate::gap::gap_fraction;
use crate::outcome::{ScanStats, SkipReason, TickerOutcome};
use crate::profile::{CapBasis, ScreenProfile};
use crate::windows::{instant_open, premarket_summary, range_low, window_close, window_high};

/// The collected output of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// Qualifying ticker-days, in ticker processing order.
    pub results: Vec<ScreenResult>,
    /// Aggregate skip statistics.
    pub stats: ScanStats,
}

/// Sequential gap-up scanner over a [`MarketData`] provider.
///
/// Every failure mode short of writing the final report is non-fatal:
/// fetch errors and threshold misses are logged, counted in [`ScanStats`],
/// and the scan moves on.
#[derive(Debug)]
pub struct Scanner<'a, M: MarketData + ?Sized> {
    provider: &'a M,
    profile: ScreenProfile,
}

impl<'a, M: MarketData + ?Sized> Scanner<'a, M> {
    /// Creates a scanner over the given provider and profile.
    pub const fn new(provider: &'a M, profile: ScreenProfile) -> Self {
        Self { provider, profile }
    }

    /// Returns the active profile.
    pub const fn profile(&self) -> &ScreenProfile {
        &self.profile
    }

    /// Scans a ticker universe, collecting results and statistics.
    ///
    /// `as_of` anchors the lookback window; results are emitted in ticker
    /// processing order.
    pub async fn scan(&self, tickers: &[String], as_of: NaiveDate) -> ScanReport {
        let mut results = Vec::new();
        let mut stats = ScanStats::default();

        for ticker in tickers {
            if let TickerOutcome::Matched(matches) =
                self.scan_ticker(ticker, as_of, &mut stats).await
            {
                results.extend(matches);
            }
        }

        ScanReport { results, stats }
    }

    /// Scans one ticker's daily history for qualifying gap-up days.
    ///
    /// In first-match mode the walk stops at the first qualifying day;
    /// later days are never evaluated.
    pub async fn scan_ticker(
        &self,
        ticker: &str,
        as_of: NaiveDate,
        stats: &mut ScanStats,
    ) -> TickerOutcome {
        stats.tickers_scanned += 1;

        let range = DateRange::lookback(as_of, self.profile.lookback_days);
        let bars = match self.provider.daily_bars(ticker, range).await {
            Ok(bars) => bars,
            Err(e) => {
                tracing::warn!(ticker, error = %e, "failed to fetch daily history");
                stats.record_skip(SkipReason::HistoryUnavailable);
                return TickerOutcome::Skipped(SkipReason::HistoryUnavailable);
            }
        };
        if bars.len() < 2 {
            tracing::debug!(ticker, bars = bars.len(), "not enough daily history");
            stats.record_skip(SkipReason::InsufficientHistory);
            return TickerOutcome::Skipped(SkipReason::InsufficientHistory);
        }

        // One details lookup per ticker; on failure both market cap fields
        // are recorded absent rather than dropping the ticker.
        let details = match self.provider.ticker_details(ticker).await {
            Ok(details) => Some(details),
            Err(e) => {
                tracing::warn!(ticker, error = %e, "details lookup failed, market cap recorded as absent");
                stats.details_unavailable += 1;
                None
            }
        };
        let given_market_cap = details.as_ref().and_then(|d| d.market_cap);
        let shares_outstanding = details
            .as_ref()
            .and_then(|d| d.share_class_shares_outstanding);

        let mut matches = Vec::new();

        for pair in bars.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            let Some(gap) = gap_fraction(previous.close, current.open) else {
                tracing::warn!(ticker, date = %current.market_date(), "zero previous close");
                stats.zero_previous_close += 1;
                continue;
            };

            if !self.profile.gap_in_range(gap)
                || !self.profile.open_gate.allows(current.open)
                || (self.profile.require_open_above_prev_high && current.open <= previous.high)
            {
                continue;
            }
            if let Some(min_cap) = self.profile.min_market_cap {
                if !given_market_cap.is_some_and(|cap| cap >= min_cap) {
                    continue;
                }
            }

            let date = current.market_date();
            let Some(premarket) = self.fetch_premarket(ticker, date, stats).await else {
                continue;
            };

            if premarket.volume < self.profile.min_premarket_volume {
                continue;
            }
            if let Some(min_notional) = self.profile.min_premarket_notional {
                if premarket.volume * current.open < min_notional {
                    continue;
                }
            }

            let calculated_market_cap = shares_outstanding.map(|shares| {
                let reference_close = match self.profile.cap_basis {
                    CapBasis::FirstClose => bars[0].close,
                    CapBasis::PreviousClose => previous.close,
                };
                shares * reference_close
            });

            let extra = self.collect_extra(ticker, date, stats).await;

            tracing::info!(ticker, date = %date, gap, "qualifying gap-up day");
            matches.push(ScreenResult {
                ticker: ticker.to_string(),
                date,
                previous_close: previous.close,
                open: current.open,
                high: current.high,
                low: current.low,
                close: current.close,
                premarket,
                given_market_cap,
                calculated_market_cap,
                extra,
            });

            if self.profile.first_match_only {
                break;
            }
        }

        if matches.is_empty() {
            TickerOutcome::NoMatch
        } else {
            stats.matched += 1;
            TickerOutcome::Matched(matches)
        }
    }

    /// Fetches and reduces the premarket session for a qualifying day.
    ///
    /// Returns `None` when the fetch fails or no premarket bars exist;
    /// either way the day fails the screen.
    async fn fetch_premarket(
        &self,
        ticker: &str,
        date: NaiveDate,
        stats: &mut ScanStats,
    ) -> Option<gapscan_types::PremarketSummary> {
        let (start_ms, end_ms) = TimeWindow::premarket().bounds_ms(date)?;

        let bars = match self.provider.minute_bars(ticker, start_ms, end_ms).await {
            Ok(bars) => bars,
            Err(e) => {
                tracing::warn!(ticker, %date, error = %e, "premarket fetch failed");
                stats.premarket_fetch_failed += 1;
                return None;
            }
        };

        let summary = premarket_summary(&bars);
        if summary.is_none() {
            tracing::debug!(ticker, %date, "no premarket data");
            stats.empty_premarket += 1;
        }
        summary
    }

    /// Collects the profile's window, checkpoint, and range-low fields for
    /// a qualifying day. A failed fetch leaves that entry's fields absent
    /// and the remaining entries still run.
    async fn collect_extra(
        &self,
        ticker: &str,
        date: NaiveDate,
        stats: &mut ScanStats,
    ) -> Vec<Field> {
        let mut fields = Vec::new();

        for window in &self.profile.windows {
            let (high, close) = match self.window_bars(ticker, date, window, stats).await {
                Some(bars) => (window_high(&bars), window_close(&bars)),
                None => (None, None),
            };
            fields.push(Field::new(window.high_label(), high));
            fields.push(Field::new(window.close_label(), close));
        }

        for checkpoint in &self.profile.checkpoints {
            let open = match checkpoint.instant_ms(date) {
                Some(instant) => match self.provider.minute_bars(ticker, instant, instant).await {
                    Ok(bars) => instant_open(&bars),
                    Err(e) => {
                        tracing::warn!(ticker, %date, checkpoint = %checkpoint, error = %e, "checkpoint fetch failed");
                        stats.window_fetch_failures += 1;
                        None
                    }
                },
                None => None,
            };
            fields.push(Field::new(checkpoint.open_label(), open));
        }

        for window in &self.profile.range_lows {
            let low = match self.window_bars(ticker, date, window, stats).await {
                Some(bars) => range_low(&bars),
                None => None,
            };
            fields.push(Field::new(window.low_label(), low));
        }

        fields
    }

    /// Fetches minute bars for one window, or `None` on fetch failure or
    /// an unresolvable window boundary.
    async fn window_bars(
        &self,
        ticker: &str,
        date: NaiveDate,
        window: &TimeWindow,
        stats: &mut ScanStats,
    ) -> Option<Vec<Bar>> {
        let (start_ms, end_ms) = window.bounds_ms(date)?;
        match self.provider.minute_bars(ticker, start_ms, end_ms).await {
            Ok(bars) => Some(bars),
            Err(e) => {
                tracing::warn!(ticker, %date, window = %window, error = %e, "window fetch failed");
                stats.window_fetch_failures += 1;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::OpenGate;
    use async_trait::async_trait;
    use chrono::DateTime;
    use gapscan_client::{FetchError, TickerDetails};
    use gapscan_types::Checkpoint;
    use std::collections::{HashMap, HashSet};

    /// In-memory provider: daily bars per ticker, one pool of minute bars
    /// per ticker sliced by the requested span.
    #[derive(Default)]
    struct MockProvider {
        daily: HashMap<String, Vec<Bar>>,
        minute: HashMap<String, Vec<Bar>>,
        details: HashMap<String, TickerDetails>,
        fail_daily: HashSet<String>,
        fail_minute: HashSet<String>,
    }

    #[async_trait]
    impl MarketData for MockProvider {
        async fn list_exchanges(
            &self,
            _asset_class: &str,
            _locale: &str,
        ) -> Result<Vec<gapscan_client::ExchangeInfo>, FetchError> {
            unimplemented!("not used in engine tests")
        }

        async fn list_tickers(
            &self,
            _market: &str,
            _exchange_mic: &str,
            _page_limit: u32,
        ) -> Result<Vec<gapscan_client::TickerInfo>, FetchError> {
            unimplemented!("not used in engine tests")
        }

        async fn daily_bars(&self, ticker: &str, _range: DateRange) -> Result<Vec<Bar>, FetchError> {
            if self.fail_daily.contains(ticker) {
                return Err(FetchError::Provider { status: 500 });
            }
            Ok(self.daily.get(ticker).cloned().unwrap_or_default())
        }

        async fn minute_bars(
            &self,
            ticker: &str,
            start_ms: i64,
            end_ms: i64,
        ) -> Result<Vec<Bar>, FetchError> {
            if self.fail_minute.contains(ticker) {
                return Err(FetchError::Provider { status: 500 });
            }
            Ok(self
                .minute
                .get(ticker)
                .map(|bars| {
                    bars.iter()
                        .filter(|b| {
                            let ms = b.timestamp.timestamp_millis();
                            ms >= start_ms && ms <= end_ms
                        })
                        .copied()
                        .collect()
                })
                .unwrap_or_default())
        }

        async fn ticker_details(&self, ticker: &str) -> Result<TickerDetails, FetchError> {
            self.details
                .get(ticker)
                .cloned()
                .ok_or(FetchError::Provider { status: 404 })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A daily bar stamped at the session open on `day` exchange time.
    fn daily_bar(day: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Bar {
        let ms = Checkpoint::from_hm(9, 30).instant_ms(day).unwrap();
        Bar::new(
            DateTime::from_timestamp_millis(ms).unwrap(),
            open,
            high,
            low,
            close,
            1_000_000.0,
        )
    }

    /// A minute bar at the given exchange-local wall-clock minute.
    fn minute_bar(day: NaiveDate, hour: u32, min: u32, price: f64, volume: f64) -> Bar {
        let ms = Checkpoint::from_hm(hour, min).instant_ms(day).unwrap();
        Bar::new(
            DateTime::from_timestamp_millis(ms).unwrap(),
            price,
            price,
            price,
            price,
            volume,
        )
    }

    /// Two daily bars forming a 20% gap on the second day, with enough
    /// premarket volume to pass the gap-and-go profile.
    fn qualifying_provider() -> MockProvider {
        let day1 = date(2024, 1, 15);
        let day2 = date(2024, 1, 16);
        let mut provider = MockProvider::default();
        provider.daily.insert(
            "ABC".to_string(),
            vec![
                daily_bar(day1, 9.5, 10.2, 9.3, 10.0),
                daily_bar(day2, 12.0, 13.5, 11.5, 13.0),
            ],
        );
        provider.minute.insert(
            "ABC".to_string(),
            vec![
                minute_bar(day2, 4, 30, 11.0, 200_000.0),
                minute_bar(day2, 7, 0, 11.8, 250_000.0),
                minute_bar(day2, 9, 15, 11.5, 150_000.0),
                minute_bar(day2, 9, 35, 12.4, 50_000.0),
                minute_bar(day2, 11, 30, 12.1, 10_000.0),
            ],
        );
        provider.details.insert(
            "ABC".to_string(),
            TickerDetails {
                ticker: "ABC".to_string(),
                market_cap: Some(800_000_000.0),
                share_class_shares_outstanding: Some(50_000_000.0),
            },
        );
        provider
    }

    #[tokio::test]
    async fn test_gap_and_go_match() {
        let provider = qualifying_provider();
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ABC", date(2024, 6, 1), &mut stats)
            .await;
        let TickerOutcome::Matched(results) = outcome else {
            panic!("expected a match, got {outcome:?}");
        };

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.ticker, "ABC");
        assert_eq!(result.date, date(2024, 1, 16));
        assert!((result.previous_close - 10.0).abs() < 1e-10);
        assert!((result.open - 12.0).abs() < 1e-10);
        assert!((result.premarket.volume - 600_000.0).abs() < 1e-10);
        assert!((result.premarket.high - 11.8).abs() < 1e-10);
        assert!((result.premarket.low - 11.0).abs() < 1e-10);
        // shares x first close
        assert_eq!(result.calculated_market_cap, Some(50_000_000.0 * 10.0));
        assert_eq!(result.extra.len(), 17);
        assert_eq!(stats.matched, 1);
    }

    #[tokio::test]
    async fn test_window_fields_absent_when_no_bars() {
        let provider = qualifying_provider();
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let TickerOutcome::Matched(results) = scanner
            .scan_ticker("ABC", date(2024, 6, 1), &mut stats)
            .await
        else {
            panic!("expected a match");
        };
        let result = &results[0];

        // One bar exists at 9:35, so the 9:30-9:44 window has values.
        let first_window_high = result
            .extra
            .iter()
            .find(|f| f.label == "9:30am-9:44am (high)")
            .unwrap();
        assert_eq!(first_window_high.value, Some(12.4));

        // No bars fall in 9:45-9:59: both fields absent, not zero.
        for label in ["9:45am-9:59am (high)", "9:45am-9:59am (close)"] {
            let field = result.extra.iter().find(|f| f.label == label).unwrap();
            assert_eq!(field.value, None, "{label} should be absent");
        }

        // The 11:30 checkpoint bar exists; 12:30 does not.
        let open_1130 = result
            .extra
            .iter()
            .find(|f| f.label == "11:30am (open)")
            .unwrap();
        assert_eq!(open_1130.value, Some(12.1));
        let open_1230 = result
            .extra
            .iter()
            .find(|f| f.label == "12:30pm (open)")
            .unwrap();
        assert_eq!(open_1230.value, None);
    }

    #[tokio::test]
    async fn test_insufficient_history() {
        let mut provider = MockProvider::default();
        provider.daily.insert(
            "ONE".to_string(),
            vec![daily_bar(date(2024, 1, 15), 10.0, 10.5, 9.5, 10.0)],
        );
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ONE", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(
            outcome,
            TickerOutcome::Skipped(SkipReason::InsufficientHistory)
        );
        assert_eq!(stats.insufficient_history, 1);
    }

    #[tokio::test]
    async fn test_history_fetch_failure() {
        let mut provider = MockProvider::default();
        provider.fail_daily.insert("ERR".to_string());
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ERR", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(
            outcome,
            TickerOutcome::Skipped(SkipReason::HistoryUnavailable)
        );
        assert_eq!(stats.history_unavailable, 1);
    }

    #[tokio::test]
    async fn test_empty_premarket_fails_day() {
        let mut provider = qualifying_provider();
        // Strip all premarket bars; regular-session bars remain.
        let bars = provider.minute.get_mut("ABC").unwrap();
        bars.retain(|b| {
            let (_, pm_end) = TimeWindow::premarket().bounds_ms(date(2024, 1, 16)).unwrap();
            b.timestamp.timestamp_millis() > pm_end
        });
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ABC", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(outcome, TickerOutcome::NoMatch);
        assert_eq!(stats.empty_premarket, 1);
    }

    #[tokio::test]
    async fn test_premarket_volume_below_threshold() {
        let mut provider = qualifying_provider();
        for bar in provider.minute.get_mut("ABC").unwrap() {
            bar.volume = 1_000.0;
        }
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ABC", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(outcome, TickerOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_zero_previous_close_skips_day() {
        let day1 = date(2024, 1, 15);
        let day2 = date(2024, 1, 16);
        let mut provider = MockProvider::default();
        provider.daily.insert(
            "ZRO".to_string(),
            vec![
                daily_bar(day1, 0.0, 0.0, 0.0, 0.0),
                daily_bar(day2, 12.0, 13.5, 11.5, 13.0),
            ],
        );
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ZRO", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(outcome, TickerOutcome::NoMatch);
        assert_eq!(stats.zero_previous_close, 1);
    }

    fn two_gap_days_provider() -> MockProvider {
        let day1 = date(2024, 1, 15);
        let day2 = date(2024, 1, 16);
        let day3 = date(2024, 1, 17);
        let day4 = date(2024, 1, 18);
        let mut provider = MockProvider::default();
        provider.daily.insert(
            "GG".to_string(),
            vec![
                daily_bar(day1, 9.5, 10.2, 9.3, 10.0),
                daily_bar(day2, 12.0, 13.5, 11.5, 13.0),
                daily_bar(day3, 13.0, 13.2, 12.8, 13.0),
                daily_bar(day4, 16.0, 17.0, 15.5, 16.5),
            ],
        );
        let mut minute = Vec::new();
        for day in [day2, day4] {
            minute.push(minute_bar(day, 5, 0, 11.0, 400_000.0));
            minute.push(minute_bar(day, 8, 0, 11.5, 400_000.0));
        }
        provider.minute.insert("GG".to_string(), minute);
        provider
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let provider = two_gap_days_provider();
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let TickerOutcome::Matched(results) =
            scanner.scan_ticker("GG", date(2024, 6, 1), &mut stats).await
        else {
            panic!("expected a match");
        };

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].date, date(2024, 1, 16));
    }

    #[tokio::test]
    async fn test_all_days_mode_keeps_scanning() {
        let provider = two_gap_days_provider();
        let mut profile = ScreenProfile::gap_and_go();
        profile.first_match_only = false;
        let scanner = Scanner::new(&provider, profile);
        let mut stats = ScanStats::default();

        let TickerOutcome::Matched(results) =
            scanner.scan_ticker("GG", date(2024, 6, 1), &mut stats).await
        else {
            panic!("expected matches");
        };

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].date, date(2024, 1, 16));
        assert_eq!(results[1].date, date(2024, 1, 18));
        // Still one matched ticker.
        assert_eq!(stats.matched, 1);
    }

    #[tokio::test]
    async fn test_details_failure_records_absent_cap() {
        let mut provider = qualifying_provider();
        provider.details.clear();
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let mut stats = ScanStats::default();

        let TickerOutcome::Matched(results) = scanner
            .scan_ticker("ABC", date(2024, 6, 1), &mut stats)
            .await
        else {
            panic!("expected a match");
        };

        assert_eq!(results[0].given_market_cap, None);
        assert_eq!(results[0].calculated_market_cap, None);
        assert_eq!(stats.details_unavailable, 1);
    }

    #[tokio::test]
    async fn test_continuation_requires_market_cap() {
        // Same qualifying shape but details lookup fails: the cap gate
        // cannot pass, so no day qualifies.
        let mut provider = qualifying_provider();
        provider.details.clear();
        let mut profile = ScreenProfile::continuation();
        // Loosen the price band so only the cap gate is in question.
        profile.open_gate = OpenGate::Band { min: 3.0, max: 999.0 };
        profile.require_open_above_prev_high = false;
        let scanner = Scanner::new(&provider, profile);
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("ABC", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(outcome, TickerOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_continuation_open_above_prev_high() {
        let day1 = date(2024, 1, 15);
        let day2 = date(2024, 1, 16);
        let mut provider = MockProvider::default();
        // Gap 10%, but the open (11.0) does not clear the previous high
        // (11.5).
        provider.daily.insert(
            "CT".to_string(),
            vec![
                daily_bar(day1, 9.5, 11.5, 9.3, 10.0),
                daily_bar(day2, 11.0, 13.5, 10.5, 13.0),
            ],
        );
        provider.minute.insert(
            "CT".to_string(),
            vec![minute_bar(day2, 5, 0, 10.8, 900_000.0)],
        );
        provider.details.insert(
            "CT".to_string(),
            TickerDetails {
                ticker: "CT".to_string(),
                market_cap: Some(800_000_000.0),
                share_class_shares_outstanding: Some(50_000_000.0),
            },
        );
        let scanner = Scanner::new(&provider, ScreenProfile::continuation());
        let mut stats = ScanStats::default();

        let outcome = scanner
            .scan_ticker("CT", date(2024, 6, 1), &mut stats)
            .await;
        assert_eq!(outcome, TickerOutcome::NoMatch);
    }

    #[tokio::test]
    async fn test_scan_is_idempotent_in_content() {
        let provider = qualifying_provider();
        let scanner = Scanner::new(&provider, ScreenProfile::gap_and_go());
        let tickers = vec!["ABC".to_string(), "MISSING".to_string()];

        let first = scanner.scan(&tickers, date(2024, 6, 1)).await;
        let second = scanner.scan(&tickers, date(2024, 6, 1)).await;

        assert_eq!(first.results, second.results);
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.results.len(), 1);
        // "MISSING" has no bars at all.
        assert_eq!(first.stats.insufficient_history, 1);
    }
}
