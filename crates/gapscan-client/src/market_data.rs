//! The provider trait the screen engine is written against.

use async_trait::async_trait;
use gapscan_types::{Bar, DateRange};

use crate::client::{FetchError, RestClient};
use crate::endpoints;
use crate::models::{
    AggsResponse, DetailsResponse, ExchangeInfo, ExchangesResponse, TickerDetails, TickerInfo,
    TickersPage,
};

/// Read access to the market-data provider.
///
/// The screener takes an implementation by reference, so tests drive the
/// engine with an in-memory mock instead of the live HTTP client.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Lists exchanges for an asset class and locale.
    async fn list_exchanges(
        &self,
        asset_class: &str,
        locale: &str,
    ) -> Result<Vec<ExchangeInfo>, FetchError>;

    /// Lists all tickers on one exchange, following pagination to the end.
    async fn list_tickers(
        &self,
        market: &str,
        exchange_mic: &str,
        page_limit: u32,
    ) -> Result<Vec<TickerInfo>, FetchError>;

    /// Fetches daily bars for a ticker over a date range, ascending by date.
    async fn daily_bars(&self, ticker: &str, range: DateRange) -> Result<Vec<Bar>, FetchError>;

    /// Fetches one-minute bars for a ticker over an inclusive
    /// epoch-millisecond span, ascending by time.
    async fn minute_bars(
        &self,
        ticker: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Bar>, FetchError>;

    /// Fetches reference details (market cap, shares outstanding) for a
    /// ticker.
    async fn ticker_details(&self, ticker: &str) -> Result<TickerDetails, FetchError>;
}

#[async_trait]
impl MarketData for RestClient {
    async fn list_exchanges(
        &self,
        asset_class: &str,
        locale: &str,
    ) -> Result<Vec<ExchangeInfo>, FetchError> {
        let url = endpoints::exchanges_url(self.base_url(), asset_class, locale);
        let response: ExchangesResponse = self.get_json(&url).await?;
        Ok(response.results)
    }

    async fn list_tickers(
        &self,
        market: &str,
        exchange_mic: &str,
        page_limit: u32,
    ) -> Result<Vec<TickerInfo>, FetchError> {
        let mut url = endpoints::tickers_url(self.base_url(), market, exchange_mic, page_limit);
        let mut tickers = Vec::new();

        loop {
            let page: TickersPage = self.get_json(&url).await?;
            tickers.extend(page.results);
            match page.next_url {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(tickers)
    }

    async fn daily_bars(&self, ticker: &str, range: DateRange) -> Result<Vec<Bar>, FetchError> {
        let url = endpoints::daily_bars_url(self.base_url(), ticker, range);
        let response: AggsResponse = self.get_json(&url).await?;
        Ok(collect_bars(ticker, response))
    }

    async fn minute_bars(
        &self,
        ticker: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Bar>, FetchError> {
        let url = endpoints::minute_bars_url(self.base_url(), ticker, start_ms, end_ms);
        let response: AggsResponse = self.get_json(&url).await?;
        Ok(collect_bars(ticker, response))
    }

    async fn ticker_details(&self, ticker: &str) -> Result<TickerDetails, FetchError> {
        let url = endpoints::ticker_details_url(self.base_url(), ticker);
        let response: DetailsResponse = self.get_json(&url).await?;
        Ok(response.results)
    }
}

/// Converts raw aggregates into bars, dropping records with timestamps
/// outside the representable range.
fn collect_bars(ticker: &str, response: AggsResponse) -> Vec<Bar> {
    response
        .results
        .into_iter()
        .filter_map(|raw| {
            let bar = raw.into_bar();
            if bar.is_none() {
                tracing::warn!(ticker, timestamp_ms = raw.timestamp_ms, "dropping bar with invalid timestamp");
            }
            bar
        })
        .collect()
}
