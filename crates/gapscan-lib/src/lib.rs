//! Gap-up stock screener over a market-data REST API.
//!
//! This is a facade crate that re-exports functionality from the gapscan
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use gapscan_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(std::env::var("GAPSCAN_API_KEY")?);
//!     let client = RestClient::new(config)?;
//!
//!     let universe = fetch_universe(&client).await?;
//!     let scanner = Scanner::new(&client, ScreenProfile::gap_and_go());
//!     let report = scanner
//!         .scan(&universe, chrono::Utc::now().date_naive())
//!         .await;
//!
//!     println!("{} qualifying tickers ({})", report.results.len(), report.stats);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gapscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use gapscan_types::*;

// Re-export the provider client
#[cfg(feature = "client")]
pub use gapscan_client::{
    ClientConfig, ExchangeInfo, FetchError, MarketData, RestClient, TickerDetails, TickerInfo,
    UNIVERSE_MICS, fetch_universe, is_screenable_symbol,
};

// Re-export the screening engine
#[cfg(feature = "screen")]
pub use gapscan_screen::{
    CapBasis, OpenGate, ScanReport, ScanStats, Scanner, ScreenProfile, SkipReason, TickerOutcome,
    gap_fraction, instant_open, premarket_summary, range_low, window_close, window_high,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use gapscan_format::{
    CsvReportWriter, FormatError, JsonReportWriter, JsonStyle, OutputFormat, ReportTable,
    ReportWriter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use gapscan_lib::prelude::*;
/// ```
pub mod prelude {
    pub use gapscan_types::{
        Bar, Checkpoint, DateRange, DateRangeError, Field, MARKET_TZ, PremarketSummary,
        ScreenResult, TimeWindow,
    };

    #[cfg(feature = "client")]
    pub use gapscan_client::{ClientConfig, MarketData, RestClient, fetch_universe};

    #[cfg(feature = "screen")]
    pub use gapscan_screen::{ScanReport, ScanStats, Scanner, ScreenProfile, TickerOutcome};

    #[cfg(feature = "format")]
    pub use gapscan_format::{
        CsvReportWriter, JsonReportWriter, OutputFormat, ReportTable, ReportWriter,
    };
}
