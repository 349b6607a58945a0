//! Error types for rowsheet

use std::path::PathBuf;

use thiserror::Error;
use umya_spreadsheet::XlsxError;

/// Result type for rowsheet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the sheet handler and the workbook gateway
///
/// Out-of-range row lookups are not errors: they yield an empty record.
#[derive(Debug, Error)]
pub enum Error {
    /// The workbook file is missing, unreadable or corrupt
    #[error("cannot open workbook '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The file extension is not one the engine reads
    #[error("unsupported file format '{}': expected .xlsx or .xlsm", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Header mode was requested but row 1 yields no column names
    #[error("the first row of the active sheet is empty, no header can be read")]
    EmptyHeader,

    /// Rows are numbered from 1
    #[error("invalid row number {0}: rows are numbered from 1")]
    InvalidRowNumber(u32),

    /// A color was not an 8-digit ARGB hex string
    #[error("invalid color '{0}': expected 8 hex digits (ARGB)")]
    InvalidColor(String),

    /// A cell address, range or column index that names no cell
    #[error("invalid cell address or range '{0}'")]
    InvalidAddress(String),

    /// The workbook has no worksheet to read from
    #[error("the workbook has no active worksheet")]
    NoActiveSheet,

    /// `save` was called on a workbook that was not opened from a file
    #[error("the workbook has no file path, use save_as")]
    NoPath,

    /// Writing the workbook failed
    #[error("cannot save workbook '{}': {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}
