//! Command implementations for the gapscan CLI.

use anyhow::{Context, Result};
use gapscan_lib::prelude::*;

pub(crate) mod augment;
pub(crate) mod scan;
pub(crate) mod tickers;

/// Environment variable holding the provider API key.
const API_KEY_VAR: &str = "GAPSCAN_API_KEY";

/// Builds the provider client from the environment.
pub(crate) fn make_client() -> Result<RestClient> {
    let api_key = std::env::var(API_KEY_VAR)
        .with_context(|| format!("{API_KEY_VAR} is not set (put it in the environment or .env)"))?;
    RestClient::new(ClientConfig::new(api_key)).context("Failed to build HTTP client")
}
