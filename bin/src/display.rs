//! Display utilities and output dispatch for the gapscan CLI.

use anyhow::Result;
use clap::ValueEnum;
use gapscan_lib::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for screen reports.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Screen profile selection.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum ProfileArg {
    /// Large overnight gap on real premarket volume.
    GapAndGo,
    /// Moderate gap in a mid-cap name opening above the prior high.
    Continuation,
}

impl ProfileArg {
    /// The profile name used in default output paths.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::GapAndGo => "gap-and-go",
            Self::Continuation => "continuation",
        }
    }

    /// Builds the screen profile for this selection.
    pub(crate) fn to_profile(self) -> ScreenProfile {
        match self {
            Self::GapAndGo => ScreenProfile::gap_and_go(),
            Self::Continuation => ScreenProfile::continuation(),
        }
    }
}

/// Write screen results to a file in the specified format.
pub(crate) fn write_report(
    results: &[ScreenResult],
    output: &Path,
    format: Format,
) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => CsvReportWriter::new().write_results(results, writer)?,
        Format::Json => JsonReportWriter::new().write_results(results, writer)?,
        Format::Ndjson => JsonReportWriter::ndjson().write_results(results, writer)?,
    }

    Ok(())
}
