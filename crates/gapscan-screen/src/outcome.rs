//! Typed scan outcomes and aggregate statistics.

use gapscan_types::ScreenResult;

/// Why a ticker was skipped without evaluating any day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The daily history fetch failed.
    HistoryUnavailable,
    /// Fewer than two daily bars exist.
    InsufficientHistory,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HistoryUnavailable => write!(f, "history unavailable"),
            Self::InsufficientHistory => write!(f, "insufficient history"),
        }
    }
}

/// Outcome of scanning one ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    /// One or more qualifying days produced results (exactly one in
    /// first-match mode).
    Matched(Vec<ScreenResult>),
    /// Every day was evaluated and none qualified.
    NoMatch,
    /// The ticker was skipped before any day was evaluated.
    Skipped(SkipReason),
}

/// Aggregate counters for one run, one increment per logged skip event.
///
/// Day-level counters (zero previous close, empty premarket, fetch
/// failures) can exceed the ticker count; ticker-level counters cannot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Tickers processed.
    pub tickers_scanned: u64,
    /// Tickers that produced at least one result.
    pub matched: u64,
    /// Tickers skipped: daily history fetch failed.
    pub history_unavailable: u64,
    /// Tickers skipped: fewer than two daily bars.
    pub insufficient_history: u64,
    /// Tickers whose details lookup failed (market cap recorded absent).
    pub details_unavailable: u64,
    /// Days skipped: previous close was zero.
    pub zero_previous_close: u64,
    /// Days skipped: the premarket fetch failed.
    pub premarket_fetch_failed: u64,
    /// Days skipped: no premarket bars returned.
    pub empty_premarket: u64,
    /// Individual window/checkpoint fetches that failed (fields absent).
    pub window_fetch_failures: u64,
}

impl ScanStats {
    /// Records a ticker-level skip.
    pub const fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::HistoryUnavailable => self.history_unavailable += 1,
            SkipReason::InsufficientHistory => self.insufficient_history += 1,
        }
    }

    /// Total tickers skipped before any day was evaluated.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.history_unavailable + self.insufficient_history
    }
}

impl std::fmt::Display for ScanStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} scanned, {} matched, {} skipped ({} no history, {} insufficient), {} details failures",
            self.tickers_scanned,
            self.matched,
            self.skipped(),
            self.history_unavailable,
            self.insufficient_history,
            self.details_unavailable
        )
    }
}
