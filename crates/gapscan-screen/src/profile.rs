//! Screen profile: the configurable rule set.

use gapscan_types::{Checkpoint, TimeWindow};

/// Which reference close the calculated market cap multiplies shares
/// outstanding against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapBasis {
    /// The first close in the fetched history.
    FirstClose,
    /// The close of the session before the qualifying day.
    PreviousClose,
}

/// Gate on the qualifying day's opening price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpenGate {
    /// Open must be strictly above the floor.
    Above(f64),
    /// Open must fall inside the inclusive band.
    Band {
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

impl OpenGate {
    /// Returns true if the gate admits the given opening price.
    #[must_use]
    pub fn allows(&self, open: f64) -> bool {
        match *self {
            Self::Above(floor) => open > floor,
            Self::Band { min, max } => open >= min && open <= max,
        }
    }
}

/// The full rule set for one screening run.
///
/// The three historical script variants differed only in thresholds and
/// window lists; a profile captures the whole variation surface so one
/// engine serves them all.
#[derive(Debug, Clone)]
pub struct ScreenProfile {
    /// Calendar days of daily history to fetch per ticker.
    pub lookback_days: u64,
    /// Minimum gap fraction (inclusive).
    pub min_gap: f64,
    /// Maximum gap fraction (exclusive), unbounded when `None`.
    pub max_gap: Option<f64>,
    /// Gate on the qualifying day's open.
    pub open_gate: OpenGate,
    /// The qualifying day's open must exceed the previous day's high.
    pub require_open_above_prev_high: bool,
    /// Minimum provider-reported market cap; a missing cap fails the gate.
    pub min_market_cap: Option<f64>,
    /// Minimum premarket volume (inclusive).
    pub min_premarket_volume: f64,
    /// Minimum premarket volume times opening price, when set.
    pub min_premarket_notional: Option<f64>,
    /// Reference close for the calculated market cap.
    pub cap_basis: CapBasis,
    /// Windows reduced to (high, close) pairs.
    pub windows: Vec<TimeWindow>,
    /// Single-instant open-price checkpoints.
    pub checkpoints: Vec<Checkpoint>,
    /// Windows reduced to their minimum low.
    pub range_lows: Vec<TimeWindow>,
    /// Stop scanning a ticker after its first qualifying day.
    pub first_match_only: bool,
}

impl ScreenProfile {
    /// The "gap and go" profile: a large overnight gap on real premarket
    /// volume, open above a dollar, with the full set of opening-range
    /// windows and afternoon checkpoints.
    #[must_use]
    pub fn gap_and_go() -> Self {
        Self {
            lookback_days: 1825,
            min_gap: 0.20,
            max_gap: None,
            open_gate: OpenGate::Above(1.0),
            require_open_above_prev_high: false,
            min_market_cap: None,
            min_premarket_volume: 500_000.0,
            min_premarket_notional: None,
            cap_basis: CapBasis::FirstClose,
            windows: vec![
                TimeWindow::from_hm(9, 30, 9, 44),
                TimeWindow::from_hm(9, 45, 9, 59),
                TimeWindow::from_hm(10, 0, 10, 14),
                TimeWindow::from_hm(10, 15, 11, 30),
                TimeWindow::from_hm(10, 15, 12, 30),
                TimeWindow::from_hm(10, 15, 13, 30),
            ],
            checkpoints: vec![
                Checkpoint::from_hm(11, 30),
                Checkpoint::from_hm(12, 30),
                Checkpoint::from_hm(13, 30),
            ],
            range_lows: vec![
                TimeWindow::from_hm(9, 30, 10, 15),
                TimeWindow::from_hm(9, 30, 13, 30),
            ],
            first_match_only: true,
        }
    }

    /// The "continuation" profile: a moderate gap in a mid-cap name priced
    /// for follow-through, opening above the prior high on heavy premarket
    /// notional.
    #[must_use]
    pub fn continuation() -> Self {
        Self {
            lookback_days: 1825,
            min_gap: 0.08,
            max_gap: Some(0.70),
            open_gate: OpenGate::Band { min: 3.0, max: 99.0 },
            require_open_above_prev_high: true,
            min_market_cap: Some(500_000_000.0),
            min_premarket_volume: 500_000.0,
            min_premarket_notional: Some(1_000_000.0),
            cap_basis: CapBasis::PreviousClose,
            windows: Vec::new(),
            checkpoints: vec![
                Checkpoint::from_hm(10, 0),
                Checkpoint::from_hm(10, 30),
                Checkpoint::from_hm(11, 30),
                Checkpoint::from_hm(12, 30),
            ],
            range_lows: vec![
                TimeWindow::from_hm(9, 30, 10, 15),
                TimeWindow::from_hm(9, 30, 11, 30),
            ],
            first_match_only: true,
        }
    }

    /// Returns true if the gap fraction falls inside the profile's bounds.
    #[must_use]
    pub fn gap_in_range(&self, gap: f64) -> bool {
        gap >= self.min_gap && self.max_gap.is_none_or(|max| gap < max)
    }

    /// Output column labels for the profile's extra fields, in emission
    /// order: window highs/closes, then checkpoint opens, then range lows.
    #[must_use]
    pub fn extra_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        for window in &self.windows {
            labels.push(window.high_label());
            labels.push(window.close_label());
        }
        for checkpoint in &self.checkpoints {
            labels.push(checkpoint.open_label());
        }
        for window in &self.range_lows {
            labels.push(window.low_label());
        }
        labels
    }
}
