//! Market-data provider REST client for the gapscan screener.
//!
//! This crate provides the provider access layer:
//!
//! - [`endpoints`] - Provider URL construction
//! - [`RestClient`] - HTTP client with connection pooling and retries
//! - [`MarketData`] - The provider trait the screen engine is written against
//! - [`fetch_universe`] - NASDAQ/NYSE symbol enumeration

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gapscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
pub mod endpoints;
mod market_data;
mod models;
mod universe;

pub use client::{ClientConfig, FetchError, RestClient};
pub use market_data::MarketData;
pub use models::{ExchangeInfo, TickerDetails, TickerInfo};
pub use universe::{UNIVERSE_MICS, fetch_universe, is_screenable_symbol};
