//! Tickers command implementation.

use crate::commands::make_client;
use anyhow::{Context, Result, bail};
use gapscan_lib::prelude::*;
use gapscan_lib::{UNIVERSE_MICS, is_screenable_symbol};

/// List the enumerated ticker universe.
pub(crate) async fn tickers(exchange: Option<&str>) -> Result<()> {
    let client = make_client()?;

    let symbols = match exchange {
        Some(mic) => {
            if !UNIVERSE_MICS.contains(&mic) {
                bail!(
                    "Unknown exchange: {}. Valid options: {}",
                    mic,
                    UNIVERSE_MICS.join(", ")
                );
            }
            client
                .list_tickers("stocks", mic, 1000)
                .await
                .with_context(|| format!("Failed to list tickers for {mic}"))?
                .into_iter()
                .map(|t| t.ticker)
                .filter(|s| is_screenable_symbol(s))
                .collect()
        }
        None => fetch_universe(&client)
            .await
            .context("Failed to enumerate the ticker universe")?,
    };

    for symbol in &symbols {
        println!("{symbol}");
    }
    eprintln!("{} symbols", symbols.len());

    Ok(())
}
