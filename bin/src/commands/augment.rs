//! Augment command implementation.
//!
//! Reads a previously exported report and appends intraday price columns
//! per row: opening prices at fixed checkpoints plus the opening-range
//! low. A failed fetch leaves that row's cell empty and the run continues.

use crate::commands::make_client;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use gapscan_lib::prelude::*;
use gapscan_lib::{instant_open, range_low};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Checkpoints sampled for every report row.
const CHECKPOINT_TIMES: [(u32, u32); 4] = [(10, 0), (10, 30), (11, 30), (12, 30)];

/// Augment a report with intraday price columns.
pub(crate) async fn augment(input: &Path, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let client = make_client()?;

    let mut table = ReportTable::read_csv_path(input)
        .with_context(|| format!("Failed to read report: {}", input.display()))?;
    let ticker_col = table.require_column("Ticker")?;
    let date_col = table.require_column("Date")?;

    let output = output.unwrap_or_else(|| default_output(input));

    let checkpoints: Vec<Checkpoint> = CHECKPOINT_TIMES
        .iter()
        .map(|&(h, m)| Checkpoint::from_hm(h, m))
        .collect();
    let low_window = TimeWindow::from_hm(9, 30, 10, 15);

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(table.rows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb
    };

    let mut checkpoint_values: Vec<Vec<Option<f64>>> = vec![Vec::new(); checkpoints.len()];
    let mut low_values: Vec<Option<f64>> = Vec::new();

    for row in &table.rows {
        let ticker = row[ticker_col].as_str();
        progress.set_message(ticker.to_string());

        let date = match NaiveDate::parse_from_str(&row[date_col], "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(ticker, date = %row[date_col], error = %e, "unparseable date, leaving row blank");
                None
            }
        };

        for (i, checkpoint) in checkpoints.iter().enumerate() {
            let open = match date.and_then(|d| checkpoint.instant_ms(d)) {
                Some(instant) => fetch_open(&client, ticker, instant).await,
                None => None,
            };
            checkpoint_values[i].push(open);
        }

        let low = match date.and_then(|d| low_window.bounds_ms(d)) {
            Some((start, end)) => fetch_low(&client, ticker, start, end).await,
            None => None,
        };
        low_values.push(low);

        progress.inc(1);
    }
    progress.finish_with_message(format!("{} rows augmented", table.rows.len()));

    for (checkpoint, values) in checkpoints.iter().zip(&checkpoint_values) {
        table.push_column(checkpoint.open_label(), values);
    }
    table.push_column(low_window.low_label(), &low_values);

    let file = File::create(&output)
        .with_context(|| format!("Failed to create output: {}", output.display()))?;
    table.write_csv(BufWriter::new(file))?;

    if !quiet {
        println!("Augmented report written to: {}", output.display());
    }

    Ok(())
}

/// Open of the minute bar at a single instant, `None` on error or no bar.
async fn fetch_open(client: &RestClient, ticker: &str, instant_ms: i64) -> Option<f64> {
    match client.minute_bars(ticker, instant_ms, instant_ms).await {
        Ok(bars) => instant_open(&bars),
        Err(e) => {
            tracing::warn!(ticker, error = %e, "checkpoint fetch failed");
            None
        }
    }
}

/// Minimum low over a window, `None` on error or no bars.
async fn fetch_low(client: &RestClient, ticker: &str, start_ms: i64, end_ms: i64) -> Option<f64> {
    match client.minute_bars(ticker, start_ms, end_ms).await {
        Ok(bars) => range_low(&bars),
        Err(e) => {
            tracing::warn!(ticker, error = %e, "range-low fetch failed");
            None
        }
    }
}

/// Default output path: `<input stem>-augmented.csv` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "report".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}-augmented.csv"))
}
