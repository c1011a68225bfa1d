//! Gap-up screening rules and intraday window aggregation.
//!
//! This crate provides the screening core:
//!
//! - [`gap_fraction`] - Day-over-day gap computation
//! - [`ScreenProfile`] - The configurable rule set (thresholds + windows)
//! - [`Scanner`] - The engine that drives a provider over a ticker universe
//! - Window reductions: [`premarket_summary`], [`window_high`],
//!   [`window_close`], [`range_low`], [`instant_open`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gapscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod gap;
mod outcome;
mod profile;
mod windows;

pub use engine::{ScanReport, Scanner};
pub use gap::gap_fraction;
pub use outcome::{ScanStats, SkipReason, TickerOutcome};
pub use profile::{CapBasis, OpenGate, ScreenProfile};
pub use windows::{instant_open, premarket_summary, range_low, window_close, window_high};
