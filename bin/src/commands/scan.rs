//! Scan command implementation.
//!
//! Enumerates the ticker universe, runs the configured screen profile over
//! each ticker sequentially, and writes the report once at the end.

use crate::commands::make_client;
use crate::display::{Format, ProfileArg, write_report};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use gapscan_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Run the gap-up screen over the ticker universe.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn scan(
    profile_arg: ProfileArg,
    as_of_str: Option<&str>,
    output: Option<PathBuf>,
    format: Format,
    tickers: Vec<String>,
    limit: Option<usize>,
    all_days: bool,
    quiet: bool,
) -> Result<()> {
    let client = make_client()?;

    let mut profile = profile_arg.to_profile();
    if all_days {
        profile.first_match_only = false;
    }

    // Anchor date (default to today)
    let as_of = match as_of_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid as-of date: {s}"))?,
        None => chrono::Utc::now().date_naive(),
    };

    // Universe: explicit tickers, or the full NASDAQ/NYSE enumeration
    let mut universe = if tickers.is_empty() {
        fetch_universe(&client)
            .await
            .context("Failed to enumerate the ticker universe")?
    } else {
        tickers
    };
    if let Some(n) = limit {
        universe.truncate(n);
    }

    // Determine output path (default to gapscan-<profile>.<format>)
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "gapscan-{}.{}",
            profile_arg.name(),
            format.extension()
        ))
    });

    // Setup progress bar
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(universe.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tickers ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} as of {}", profile_arg.name(), as_of));
        pb
    };

    // Scan tickers one at a time; every failure short of the final write
    // is counted and skipped.
    let scanner = Scanner::new(&client, profile);
    let mut stats = ScanStats::default();
    let mut results = Vec::new();

    for ticker in &universe {
        progress.set_message(ticker.clone());
        if let TickerOutcome::Matched(matches) =
            scanner.scan_ticker(ticker, as_of, &mut stats).await
        {
            results.extend(matches);
        }
        progress.inc(1);
    }

    progress.finish_with_message(stats.to_string());

    write_report(&results, &output, format)?;

    if !quiet {
        println!("Report written to: {}", output.display());
    }

    Ok(())
}
