//! JSON report output.

use gapscan_types::ScreenResult;
use std::io::Write;

use crate::{FormatError, ReportWriter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON report writer. Each record serializes as one flat object keyed by
/// the report column labels.
#[derive(Debug, Clone, Default)]
pub struct JsonReportWriter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonReportWriter {
    /// Creates a new JSON writer with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON writer.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl ReportWriter for JsonReportWriter {
    fn write_results<W: Write + Send>(
        &self,
        results: &[ScreenResult],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, results)?;
                } else {
                    serde_json::to_writer(&mut writer, results)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for result in results {
                    serde_json::to_writer(&mut writer, result)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gapscan_types::{Field, PremarketSummary};
    use std::io::Cursor;

    fn sample_result(ticker: &str) -> ScreenResult {
        ScreenResult {
            ticker: ticker.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            previous_close: 10.0,
            open: 12.0,
            high: 13.5,
            low: 11.5,
            close: 13.0,
            premarket: PremarketSummary {
                high: 11.8,
                low: 11.0,
                volume: 600_000.0,
            },
            given_market_cap: None,
            calculated_market_cap: Some(500_000_000.0),
            extra: vec![Field::new("11:30am (open)".to_string(), None)],
        }
    }

    #[test]
    fn test_json_array() {
        let writer = JsonReportWriter::new();
        let mut output = Cursor::new(Vec::new());
        writer
            .write_results(&[sample_result("ABC")], &mut output)
            .unwrap();

        let text = String::from_utf8(output.into_inner()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["Ticker"], "ABC");
        assert_eq!(parsed[0]["Open"], 12.0);
        assert!(parsed[0]["11:30am (open)"].is_null());
    }

    #[test]
    fn test_ndjson_one_line_per_record() {
        let writer = JsonReportWriter::ndjson();
        let mut output = Cursor::new(Vec::new());
        writer
            .write_results(&[sample_result("ABC"), sample_result("XYZ")], &mut output)
            .unwrap();

        let text = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["Ticker"], "XYZ");
    }
}
