//! Workbook gateway: file I/O and cell-level access to the active sheet
//!
//! The workbook is held as a whole `umya_spreadsheet` book, so saving
//! writes back every part of the file, including the ones rowsheet never
//! looks at (merges, column widths, validations, borders, defined names).

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use umya_spreadsheet::{Cell, Color, PatternValues, Spreadsheet, Style, Worksheet};

use crate::colors::normalize_argb;
use crate::error::{Error, Result};
use crate::position::{self, CellRange};
use crate::value::CellValue;

/// An open workbook and the path it is saved to
///
/// Every accessor works on the active sheet.
pub struct Gateway {
    book: Spreadsheet,
    active: usize,
    path: Option<PathBuf>,
}

impl Gateway {
    /// Open an `.xlsx` or `.xlsm` file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xlsm"));
        if !supported {
            return Err(Error::UnsupportedFormat(path.to_path_buf()));
        }

        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let gateway = Self::bind(book, Some(path.to_path_buf()))?;
        debug!(
            "opened {} ({} sheets, active {})",
            path.display(),
            gateway.book.get_sheet_count(),
            gateway.active
        );
        Ok(gateway)
    }

    /// Wrap an in-memory book with no backing file
    pub fn from_spreadsheet(book: Spreadsheet) -> Result<Self> {
        Self::bind(book, None)
    }

    fn bind(book: Spreadsheet, path: Option<PathBuf>) -> Result<Self> {
        let count = book.get_sheet_count();
        if count == 0 {
            return Err(Error::NoActiveSheet);
        }

        let tab = book.get_workbook_view().get_active_tab().to_owned() as usize;
        let active = if tab < count {
            tab
        } else {
            warn!("active tab {} out of range, reading sheet 0", tab);
            0
        };
        Ok(Self { book, active, path })
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The whole book
    pub fn spreadsheet(&self) -> &Spreadsheet {
        &self.book
    }

    /// The active sheet
    pub fn sheet(&self) -> Result<&Worksheet> {
        self.book.get_sheet(&self.active).ok_or(Error::NoActiveSheet)
    }

    fn sheet_mut(&mut self) -> Result<&mut Worksheet> {
        self.book
            .get_sheet_mut(&self.active)
            .ok_or(Error::NoActiveSheet)
    }

    /// 1-based number of the last row holding any cell, 0 for an empty sheet
    pub fn highest_row(&self) -> Result<u32> {
        Ok(self.sheet()?.get_highest_row())
    }

    /// 1-based index of the last column holding any cell, 0 for an empty sheet
    pub fn highest_column(&self) -> Result<u32> {
        Ok(self.sheet()?.get_highest_column())
    }

    /// Values of a rectangle, row-major, with formulas read as their cached values
    pub fn read_range(&self, range: &CellRange) -> Result<Vec<Vec<CellValue>>> {
        let sheet = self.sheet()?;
        Ok((range.first_row..=range.last_row)
            .map(|row| {
                (range.first_column..=range.last_column)
                    .map(|column| sheet.get_cell((column, row)).map_or(CellValue::Empty, cell_value))
                    .collect()
            })
            .collect())
    }

    /// Value of one cell
    pub fn read_cell(&self, address: &str) -> Result<CellValue> {
        let (column, row) = position::from_address(address)?;
        Ok(self
            .sheet()?
            .get_cell((column, row))
            .map_or(CellValue::Empty, cell_value))
    }

    /// Set the value of one cell, keeping its style
    pub fn write_cell<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let (column, row) = position::from_address(address)?;
        let cell = self.sheet_mut()?.get_cell_mut((column, row));
        match value.into() {
            CellValue::Empty => {
                cell.set_value_string("");
            }
            CellValue::Boolean(b) => {
                cell.set_value_bool(b);
            }
            CellValue::Number(n) => {
                cell.set_value_number(n);
            }
            CellValue::String(s) => {
                cell.set_value_string(s);
            }
            CellValue::Error(e) => {
                cell.set_value(e);
            }
        }
        Ok(())
    }

    /// Font color of a cell as ARGB, `None` when unset or theme-based
    pub fn font_color(&self, column: u32, row: u32) -> Result<Option<String>> {
        Ok(self
            .sheet()?
            .get_cell((column, row))
            .and_then(|cell| cell.get_style().get_font())
            .and_then(|font| normalize_argb(font.get_color().get_argb())))
    }

    /// Start and end stops of a cell's fill as ARGB
    pub fn fill_colors(&self, column: u32, row: u32) -> Result<(Option<String>, Option<String>)> {
        let sheet = self.sheet()?;
        let pattern = sheet
            .get_cell((column, row))
            .and_then(|cell| cell.get_style().get_fill())
            .and_then(|fill| fill.get_pattern_fill());

        let start = pattern
            .and_then(|p| p.get_foreground_color())
            .and_then(|c| normalize_argb(c.get_argb()));
        let end = pattern
            .and_then(|p| p.get_background_color())
            .and_then(|c| normalize_argb(c.get_argb()));
        Ok((start, end))
    }

    pub fn set_font_color(&mut self, range: &CellRange, argb: &str) -> Result<()> {
        let color = argb_color(argb);
        self.restyle(range, |style| {
            style.get_font_mut().set_color(color.clone());
        })
    }

    /// Switch a range to a solid fill, leaving both stops as they are
    pub fn enable_solid_fill(&mut self, range: &CellRange) -> Result<()> {
        self.restyle(range, |style| {
            style
                .get_fill_mut()
                .get_pattern_fill_mut()
                .set_pattern_type(PatternValues::Solid);
        })
    }

    pub fn set_fill_start(&mut self, range: &CellRange, argb: &str) -> Result<()> {
        let color = argb_color(argb);
        self.restyle(range, |style| {
            style
                .get_fill_mut()
                .get_pattern_fill_mut()
                .set_foreground_color(color.clone());
        })
    }

    pub fn set_fill_end(&mut self, range: &CellRange, argb: &str) -> Result<()> {
        let color = argb_color(argb);
        self.restyle(range, |style| {
            style
                .get_fill_mut()
                .get_pattern_fill_mut()
                .set_background_color(color.clone());
        })
    }

    fn restyle<F: FnMut(&mut Style)>(&mut self, range: &CellRange, mut apply: F) -> Result<()> {
        let sheet = self.sheet_mut()?;
        for (column, row) in range.cells() {
            apply(sheet.get_cell_mut((column, row)).get_style_mut());
        }
        Ok(())
    }

    /// Write the workbook back to the file it was opened from
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(Error::NoPath)?;
        self.write_to(path)
    }

    /// Write the workbook to another file and save there from now on
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|source| Error::Save {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("saved {}", path.display());
        Ok(())
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("path", &self.path)
            .field("sheets", &self.book.get_sheet_count())
            .field("active", &self.active)
            .finish()
    }
}

fn argb_color(argb: &str) -> Color {
    let mut color = Color::default();
    color.set_argb(argb);
    color
}

fn cell_value(cell: &Cell) -> CellValue {
    let text = cell.get_value();
    if text.is_empty() {
        return CellValue::Empty;
    }

    let data_type: &str = &cell.get_data_type();
    match data_type {
        "n" => text
            .parse()
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::String(text.to_string())),
        "b" => CellValue::Boolean(text.eq_ignore_ascii_case("TRUE") || text == "1"),
        "e" => CellValue::Error(text.to_string()),
        _ => CellValue::String(text.to_string()),
    }
}
