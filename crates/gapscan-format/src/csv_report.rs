//! CSV report output.

use gapscan_types::ScreenResult;
use std::io::Write;

use crate::{FormatError, ReportWriter};

/// CSV report writer.
///
/// The header is the fixed columns followed by the extra field labels of
/// the first record; all records of a run come from one profile, so every
/// row shares that column set. Absent values are written as empty cells.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include the header row.
    include_header: bool,
}

impl Default for CsvReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReportWriter {
    /// Creates a new CSV writer with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

/// Formats an optional value, empty when absent.
fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportWriter for CsvReportWriter {
    fn write_results<W: Write + Send>(
        &self,
        results: &[ScreenResult],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            let mut header: Vec<&str> = ScreenResult::CORE_LABELS.to_vec();
            if let Some(first) = results.first() {
                header.extend(first.extra_labels());
            }
            writeln!(writer, "{}", header.join(&d.to_string()))?;
        }

        for result in results {
            let mut row = vec![
                result.ticker.clone(),
                result.date.format("%Y-%m-%d").to_string(),
                result.previous_close.to_string(),
                result.open.to_string(),
                result.high.to_string(),
                result.low.to_string(),
                result.close.to_string(),
                result.premarket.high.to_string(),
                result.premarket.low.to_string(),
                result.premarket.volume.to_string(),
                cell(result.given_market_cap),
                cell(result.calculated_market_cap),
            ];
            row.extend(result.extra.iter().map(|f| cell(f.value)));
            writeln!(writer, "{}", row.join(&d.to_string()))?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
