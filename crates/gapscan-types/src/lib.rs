//! Core types for the gapscan gap-up screener.
//!
//! This crate provides the fundamental data structures used throughout
//! gapscan:
//!
//! - [`Bar`] - An aggregate OHLCV bar (daily or minute granularity)
//! - [`DateRange`] - Inclusive date range for historical data retrieval
//! - [`TimeWindow`] / [`Checkpoint`] - Exchange-local clock-time slices
//! - [`ScreenResult`] - One qualifying ticker-day with its derived fields

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gapscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod date_range;
mod result;
mod window;

pub use bar::Bar;
pub use date_range::{DateRange, DateRangeError};
pub use result::{Field, PremarketSummary, ScreenResult};
pub use window::{Checkpoint, MARKET_TZ, TimeWindow, wallclock_label};
