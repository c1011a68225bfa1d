//! Report writers and readers for the gapscan screener.
//!
//! This crate provides the output boundary:
//!
//! - [`CsvReportWriter`] - CSV format
//! - [`JsonReportWriter`] - JSON array or NDJSON format
//! - [`ReportTable`] - Round-trippable CSV table for report augmentation

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/gapscan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv_report;
mod json;
mod report;
mod table;

pub use csv_report::CsvReportWriter;
pub use json::{JsonReportWriter, JsonStyle};
pub use report::{FormatError, OutputFormat, ReportWriter};
pub use table::ReportTable;
