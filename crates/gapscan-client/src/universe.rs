//! NASDAQ/NYSE symbol enumeration.

use crate::client::FetchError;
use crate::market_data::MarketData;

/// Market identifier codes of the exchanges the screener covers.
pub const UNIVERSE_MICS: [&str; 2] = ["XNAS", "XNYS"];

/// Page size for ticker listing requests.
const TICKER_PAGE_LIMIT: u32 = 1000;

/// Returns true for symbols the screener considers: entirely ASCII
/// uppercase letters. Rejects symbols with digits, dots, warrants, and
/// class suffixes like "BRK.A".
#[must_use]
pub fn is_screenable_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.bytes().all(|b| b.is_ascii_uppercase())
}

/// Enumerates the ticker universe: all screenable symbols listed on NASDAQ
/// and NYSE, in the provider's listing order.
///
/// A failure listing one exchange's tickers is logged and enumeration
/// continues with the remaining exchanges; a partial universe is not fatal.
///
/// # Errors
///
/// Returns an error only if the exchange listing itself cannot be fetched.
pub async fn fetch_universe<M: MarketData + ?Sized>(
    provider: &M,
) -> Result<Vec<String>, FetchError> {
    let exchanges = provider.list_exchanges("stocks", "us").await?;
    let mics: Vec<String> = exchanges
        .into_iter()
        .filter_map(|e| e.mic)
        .filter(|mic| UNIVERSE_MICS.contains(&mic.as_str()))
        .collect();

    let mut symbols = Vec::new();
    for mic in &mics {
        match provider.list_tickers("stocks", mic, TICKER_PAGE_LIMIT).await {
            Ok(tickers) => {
                symbols.extend(
                    tickers
                        .into_iter()
                        .map(|t| t.ticker)
                        .filter(|s| is_screenable_symbol(s)),
                );
            }
            Err(e) => {
                tracing::warn!(exchange = %mic, error = %e, "failed to list tickers, skipping exchange");
            }
        }
    }

    Ok(symbols)
}
