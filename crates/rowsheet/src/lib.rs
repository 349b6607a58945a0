//! # rowsheet
//!
//! Row-oriented access to XLSX spreadsheets for batch pipelines.
//!
//! A [`SheetHandler`] reads the active sheet of a workbook, takes row 1 as
//! the header and hands out the rows below it as [`Record`]s keyed by
//! header name. Rows are materialized a page at a time (5000 by default),
//! so large sheets never sit in memory as a whole. Cell values can be
//! written and cells recolored; [`SheetHandler::get_row_full_info`] reports
//! each cell's font and fill colors next to its value.
//!
//! ## Features
//!
//! - Paged, cursor-driven reading with random access by row number
//! - Header-keyed or plain-list records
//! - Font and fill colors as ARGB strings or coarse names
//! - Cell writes, text and fill recoloring, save back to disk
//! - `serde` feature: records serialize as JSON-style objects and arrays
//!
//! The workbook is read and written through `umya_spreadsheet`, which keeps
//! every part of the file it was opened from. Saving after a recolor leaves
//! merges, column widths, validations, borders and defined names in place.
//!
//! ## Example
//!
//! ```no_run
//! use rowsheet::prelude::*;
//!
//! let mut sheet = SheetHandler::open("orders.xlsx")?;
//! println!("columns: {:?}", sheet.header());
//!
//! while sheet.has_next() {
//!     let line = sheet.current_row();
//!     let row = sheet.get_row(None)?;
//!     if row.get("status").and_then(|v| v.as_string()) == Some("failed") {
//!         sheet.set_fill_color(&format!("A{line}:{}{line}", sheet.highest_column()), "FFED1C24")?;
//!     }
//! }
//! sheet.save()?;
//! # Ok::<(), rowsheet::Error>(())
//! ```

pub mod colors;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod lookup;
pub mod options;
pub mod position;
pub mod prelude;
pub mod record;
pub mod value;
pub mod window;

mod header;

pub use colors::{ArgbColors, CellColors, ColorName, FillColor, FillStops, NamedColors};
pub use error::{Error, Result};
pub use gateway::Gateway;
pub use handler::{PaintTarget, SheetHandler};
pub use options::{ColorMode, CursorPolicy, HandlerOptions, HeaderKeys, LoadOptions, DEFAULT_PAGE_SIZE};
pub use position::CellRange;
pub use record::{CellInfo, Record};
pub use value::CellValue;
pub use window::{Pagination, RowWindow};

// Re-export the engine for building books in memory
pub use umya_spreadsheet;
pub use umya_spreadsheet::{Spreadsheet, XlsxError};
