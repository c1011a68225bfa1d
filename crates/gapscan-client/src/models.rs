//! Provider response models.

use chrono::DateTime;
use gapscan_types::Bar;
use serde::Deserialize;

/// One exchange from the reference listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    /// Market identifier code, e.g. "XNAS" for NASDAQ.
    pub mic: Option<String>,
    /// Exchange display name.
    pub name: Option<String>,
    /// Venue kind, e.g. "exchange" or "TRF".
    #[serde(rename = "type")]
    pub exchange_type: Option<String>,
}

/// Envelope for the exchange listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ExchangesResponse {
    #[serde(default)]
    pub(crate) results: Vec<ExchangeInfo>,
}

/// One symbol from the ticker listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// The ticker symbol.
    pub ticker: String,
    /// Company name.
    pub name: Option<String>,
    /// Primary exchange MIC.
    pub primary_exchange: Option<String>,
}

/// One page of the ticker listing; `next_url` is the pagination cursor.
#[derive(Debug, Deserialize)]
pub(crate) struct TickersPage {
    #[serde(default)]
    pub(crate) results: Vec<TickerInfo>,
    pub(crate) next_url: Option<String>,
}

/// A raw aggregate bar as the provider returns it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawAgg {
    #[serde(rename = "o")]
    pub(crate) open: f64,
    #[serde(rename = "h")]
    pub(crate) high: f64,
    #[serde(rename = "l")]
    pub(crate) low: f64,
    #[serde(rename = "c")]
    pub(crate) close: f64,
    #[serde(rename = "v")]
    pub(crate) volume: f64,
    /// Bar start, epoch milliseconds UTC.
    #[serde(rename = "t")]
    pub(crate) timestamp_ms: i64,
}

impl RawAgg {
    /// Converts into a [`Bar`], or `None` for an out-of-range timestamp.
    pub(crate) fn into_bar(self) -> Option<Bar> {
        let timestamp = DateTime::from_timestamp_millis(self.timestamp_ms)?;
        Some(Bar::new(
            timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ))
    }
}

/// Envelope for aggregate bar queries. The provider omits `results`
/// entirely when no bars exist in the span.
#[derive(Debug, Deserialize)]
pub(crate) struct AggsResponse {
    #[serde(default)]
    pub(crate) results: Vec<RawAgg>,
}

/// Per-ticker reference details.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerDetails {
    /// The ticker symbol.
    pub ticker: String,
    /// Provider-reported market cap.
    pub market_cap: Option<f64>,
    /// Shares outstanding for the listed share class.
    pub share_class_shares_outstanding: Option<f64>,
}

/// Envelope for the ticker details lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub(crate) results: TickerDetails,
}
