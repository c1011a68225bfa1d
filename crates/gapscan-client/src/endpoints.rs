//! Provider URL construction.

use gapscan_types::DateRange;

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Builds the exchange listing URL.
#[must_use]
pub fn exchanges_url(base: &str, asset_class: &str, locale: &str) -> String {
    format!("{base}/v3/reference/exchanges?asset_class={asset_class}&locale={locale}")
}

/// Builds the ticker listing URL for one exchange.
///
/// `limit` is the page size; subsequent pages are reached through the
/// cursor URL the provider returns in each page.
#[must_use]
pub fn tickers_url(base: &str, market: &str, exchange_mic: &str, limit: u32) -> String {
    format!(
        "{base}/v3/reference/tickers?market={market}&exchange={exchange_mic}&active=true&limit={limit}"
    )
}

/// Builds the daily aggregate bars URL for a date range.
#[must_use]
pub fn daily_bars_url(base: &str, ticker: &str, range: DateRange) -> String {
    format!(
        "{base}/v2/aggs/ticker/{ticker}/range/1/day/{}/{}?adjusted=true&sort=asc&limit=50000",
        range.start, range.end
    )
}

/// Builds the minute aggregate bars URL for an epoch-millisecond span.
///
/// Both bounds are inclusive; a single-instant query passes the same value
/// twice.
#[must_use]
pub fn minute_bars_url(base: &str, ticker: &str, start_ms: i64, end_ms: i64) -> String {
    format!(
        "{base}/v2/aggs/ticker/{ticker}/range/1/minute/{start_ms}/{end_ms}?adjusted=true&sort=asc&limit=50000"
    )
}

/// Builds the ticker details URL.
#[must_use]
pub fn ticker_details_url(base: &str, ticker: &str) -> String {
    format!("{base}/v3/reference/tickers/{ticker}")
}
