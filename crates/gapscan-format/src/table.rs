//! Round-trippable CSV report tables.
//!
//! The augment operation reads a previously exported report, appends new
//! intraday columns per row, and writes the widened table back out. At
//! this stage rows are raw string cells; only the ticker and date columns
//! are interpreted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::FormatError;

/// A report as a plain table of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    /// Column headers, in order.
    pub columns: Vec<String>,
    /// Rows of cells; each row has one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Reads a CSV report from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed CSV.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, FormatError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(ToString::to_string).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Reads a CSV report from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn read_csv_path(path: &Path) -> Result<Self, FormatError> {
        Self::read_csv(File::open(path)?)
    }

    /// Writes the table as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), FormatError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Returns the index of a column by header name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the index of a column, or an error naming the missing
    /// header.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingColumn`] when absent.
    pub fn require_column(&self, name: &str) -> Result<usize, FormatError> {
        self.column_index(name)
            .ok_or_else(|| FormatError::MissingColumn(name.to_string()))
    }

    /// Appends a column; `values` pairs with rows by index, absent values
    /// become empty cells. Missing trailing values pad as empty.
    pub fn push_column(&mut self, label: impl Into<String>, values: &[Option<f64>]) {
        self.columns.push(label.into());
        for (i, row) in self.rows.iter_mut().enumerate() {
            let cell = values
                .get(i)
                .copied()
                .flatten()
                .map(|v| v.to_string())
                .unwrap_or_default();
            row.push(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "Ticker,Date,Open\nABC,2024-01-16,12\nXYZ,2024-02-05,7.5\n";

    #[test]
    fn test_read_csv() {
        let table = ReportTable::read_csv(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(table.columns, vec!["Ticker", "Date", "Open"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "XYZ");
    }

    #[test]
    fn test_round_trip() {
        let table = ReportTable::read_csv(Cursor::new(SAMPLE)).unwrap();
        let mut output = Cursor::new(Vec::new());
        table.write_csv(&mut output).unwrap();

        let text = String::from_utf8(output.into_inner()).unwrap();
        let reread = ReportTable::read_csv(Cursor::new(text)).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn test_push_column_pads_absent() {
        let mut table = ReportTable::read_csv(Cursor::new(SAMPLE)).unwrap();
        table.push_column("10:00am (open)", &[Some(12.3), None]);

        assert_eq!(table.columns.last().unwrap(), "10:00am (open)");
        assert_eq!(table.rows[0].last().unwrap(), "12.3");
        assert_eq!(table.rows[1].last().unwrap(), "");
    }

    #[test]
    fn test_require_column() {
        let table = ReportTable::read_csv(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(table.require_column("Date").unwrap(), 1);
        assert!(matches!(
            table.require_column("Volume"),
            Err(FormatError::MissingColumn(_))
        ));
    }
}
