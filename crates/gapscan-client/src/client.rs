//! HTTP client for the market-data provider.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::endpoints::DEFAULT_BASE_URL;

/// Configuration for the provider client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Provider API key, sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Provider base URL (overridable for tests).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with the given API key and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 5,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            user_agent: format!("gapscan/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur talking to the provider.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request or response decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status after all retries.
    #[error("Provider error: status {status}")]
    Provider {
        /// HTTP status code.
        status: u16,
    },
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    config: ClientConfig,
}

impl RestClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetches a URL and decodes the JSON response body.
    ///
    /// Retries server errors (5xx), rate limiting (429), and transport
    /// failures with capped exponential backoff. The `url` may be a
    /// constructed endpoint or a provider pagination cursor; the API key is
    /// appended as a query parameter either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after all retries or the body
    /// cannot be decoded.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut attempts = 0;

        loop {
            let request = self
                .client
                .get(url)
                .query(&[("apiKey", self.config.api_key.as_str())]);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            tokio::time::sleep(self.backoff_delay(attempts)).await;
                            continue;
                        }
                        return Err(FetchError::Provider {
                            status: status.as_u16(),
                        });
                    }

                    response.error_for_status_ref()?;
                    return Ok(response.json().await?);
                }
                Err(e) if is_retryable(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    tokio::time::sleep(self.backoff_delay(attempts)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Backoff delay for the given attempt: base_delay * 2^attempt, capped.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        Duration::from_millis(exp_delay.min(self.config.max_delay_ms))
    }
}

/// Determines if a transport error is worth retrying.
fn is_retryable(error: &reqwest::Error) -> bool {
    if error.is_builder() || error.is_decode() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}
