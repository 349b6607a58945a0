//! Paged, cursor-driven row access over the active sheet

use std::path::Path;

use log::{debug, trace, warn};
use umya_spreadsheet::Spreadsheet;

use crate::colors::FillColor;
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::header;
use crate::lookup;
use crate::options::{CursorPolicy, HandlerOptions, LoadOptions};
use crate::position::{self, CellRange};
use crate::record::{CellInfo, Record};
use crate::value::CellValue;
use crate::window::{Pagination, RowWindow};

/// What [`SheetHandler::paint_range`] recolors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintTarget {
    #[default]
    Fill,
    Font,
}

/// Reads the active sheet of a workbook as header-keyed records, a page of
/// rows at a time
///
/// Row 1 is the header unless the load says otherwise. A cursor tracks the
/// next row for parameterless [`get_row`](Self::get_row) calls; only the most
/// recently paged block of rows is held in memory.
///
/// ```no_run
/// use rowsheet::SheetHandler;
///
/// let mut sheet = SheetHandler::open("orders.xlsx")?;
/// while sheet.has_next() {
///     let row = sheet.get_row(None)?;
///     println!("{:?}", row.get("sku"));
/// }
/// # Ok::<(), rowsheet::Error>(())
/// ```
#[derive(Debug)]
pub struct SheetHandler {
    options: HandlerOptions,
    gateway: Gateway,
    session: Session,
}

/// Everything derived from one load, replaced as a unit
#[derive(Debug)]
struct Session {
    header: Option<Vec<String>>,
    first_data_row: u32,
    highest_row: u32,
    highest_column: u32,
    cursor: u32,
    window: RowWindow,
    pagination: Pagination,
}

impl SheetHandler {
    /// Open a workbook with default options, reading row 1 as the header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, HandlerOptions::default(), LoadOptions::default())
    }

    /// Open a workbook with explicit options
    pub fn open_with<P: AsRef<Path>>(path: P, options: HandlerOptions, load: LoadOptions) -> Result<Self> {
        let gateway = Gateway::open(path)?;
        Self::with_gateway(gateway, options, load)
    }

    /// Read from an in-memory book
    pub fn from_spreadsheet(book: Spreadsheet, options: HandlerOptions, load: LoadOptions) -> Result<Self> {
        let gateway = Gateway::from_spreadsheet(book)?;
        Self::with_gateway(gateway, options, load)
    }

    fn with_gateway(gateway: Gateway, options: HandlerOptions, load: LoadOptions) -> Result<Self> {
        let session = Session::start(&gateway, &options, load, None)?;
        Ok(Self {
            options,
            gateway,
            session,
        })
    }

    /// Load a workbook into this handler
    ///
    /// Header, window, cursor and paging state are replaced together, and
    /// only if the load succeeds. Unless `force_reset` is set, reading
    /// resumes at the previous cursor position.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, load: LoadOptions) -> Result<&mut Self> {
        let gateway = Gateway::open(path)?;
        let resume = (!load.force_reset).then_some(self.session.cursor);
        let session = Session::start(&gateway, &self.options, load, resume)?;
        self.gateway = gateway;
        self.session = session;
        Ok(self)
    }

    /// Save to the file the workbook was loaded from
    ///
    /// Writes are not visible to row reads until the file is loaded again.
    pub fn save(&self) -> Result<()> {
        self.gateway.save()
    }

    /// Save to another file, which becomes the handler's path
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.gateway.save_as(path)
    }

    // === Rows ===

    /// The row at `line`, or at the cursor when `line` is `None`
    ///
    /// Rows outside the sheet's data rows come back as an empty record. A
    /// found row moves the cursor forward by one; with
    /// [`CursorPolicy::AdvanceOnEveryFetch`] that includes explicit `line`s.
    pub fn get_row(&mut self, line: Option<u32>) -> Result<Record> {
        self.fetch_row(line).map(|(_, record)| record)
    }

    /// Like [`get_row`](Self::get_row), with each value paired with its cell colors
    ///
    /// Columns are numbered by their position in the record.
    pub fn get_row_full_info(&mut self, line: Option<u32>) -> Result<Record<CellInfo>> {
        let (row, record) = self.fetch_row(line)?;
        let gateway = &self.gateway;
        let mode = self.options.color_mode;

        record.try_map_indexed(|column, value| {
            Ok::<_, Error>(CellInfo {
                value,
                colors: lookup::get_colors(gateway, row, column, mode)?,
            })
        })
    }

    /// Whether the cursor still points at a data row
    pub fn has_next(&self) -> bool {
        self.session.cursor <= self.session.highest_row
    }

    /// Column names, empty when the load had no header
    pub fn header(&self) -> &[String] {
        self.session.header.as_deref().unwrap_or(&[])
    }

    /// The rows currently held in memory
    ///
    /// Paging replaces the window, so this view is only valid until the
    /// next row fetch.
    pub fn rows(&self) -> &RowWindow {
        &self.session.window
    }

    /// The row number `line` resolves to and its record, moving the cursor
    fn fetch_row(&mut self, line: Option<u32>) -> Result<(u32, Record)> {
        let row = match line {
            Some(0) => return Err(Error::InvalidRowNumber(0)),
            Some(row) => row,
            None => self.session.cursor,
        };

        let record = match self.session.fetch(&self.gateway, &self.options, row)? {
            Some(record) => {
                if line.is_none() || self.options.cursor_policy == CursorPolicy::AdvanceOnEveryFetch {
                    self.session.cursor = self.session.cursor.saturating_add(1);
                    trace!("cursor at row {}", self.session.cursor);
                }
                record
            }
            None => Record::empty(self.session.header.is_some()),
        };
        Ok((row, record))
    }

    // === Writes ===

    /// Set a cell value, keeping its style
    pub fn write_cell<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<&mut Self> {
        self.gateway.write_cell(address, value)?;
        Ok(self)
    }

    /// Set the font color (8-digit ARGB) of every cell in a range such as `"A2:C4"`
    pub fn set_text_color(&mut self, range: &str, argb: &str) -> Result<&mut Self> {
        lookup::set_text_color(&mut self.gateway, range, argb)?;
        Ok(self)
    }

    /// Fill every cell in a range
    ///
    /// A plain ARGB string sets both stops; a [`FillColor`] may leave either
    /// stop untouched.
    pub fn set_fill_color<C: Into<FillColor>>(&mut self, range: &str, color: C) -> Result<&mut Self> {
        lookup::set_fill_color(&mut self.gateway, range, &color.into())?;
        Ok(self)
    }

    /// Recolor the fill or the font of a range with one ARGB color
    pub fn paint_range(&mut self, range: &str, argb: &str, target: PaintTarget) -> Result<&mut Self> {
        match target {
            PaintTarget::Fill => self.set_fill_color(range, argb),
            PaintTarget::Font => self.set_text_color(range, argb),
        }
    }

    // === State ===

    /// The cursor: the row the next parameterless fetch returns
    pub fn current_row(&self) -> u32 {
        self.session.cursor
    }

    /// First data row: 2 with a header, 1 without
    pub fn first_data_row(&self) -> u32 {
        self.session.first_data_row
    }

    /// Last row of the sheet, as of the load
    pub fn highest_row(&self) -> u32 {
        self.session.highest_row
    }

    /// Letters of the last column read, after the header has cut it back
    pub fn highest_column(&self) -> String {
        position::column_letters(self.session.highest_column)
    }

    /// Path of the loaded workbook
    pub fn path(&self) -> Option<&Path> {
        self.gateway.path()
    }

    /// Pages read since the load
    pub fn pages_loaded(&self) -> u32 {
        self.session.pagination.pages_loaded
    }

    /// Paging state since the load
    pub fn pagination(&self) -> &Pagination {
        &self.session.pagination
    }

    /// Options the handler was opened with, kept across loads
    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// The loaded workbook, including writes not yet visible to row reads
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}

impl Session {
    /// Resolve the header and read the first page
    fn start(gateway: &Gateway, options: &HandlerOptions, load: LoadOptions, resume: Option<u32>) -> Result<Self> {
        let first_data_row = load.first_data_row();
        let highest_row = gateway.highest_row()?;
        let mut highest_column = gateway.highest_column()?;

        let header = if load.with_header {
            let cells = match highest_column {
                0 => Vec::new(),
                n => gateway
                    .read_range(&CellRange::new(1, 1, n, 1))?
                    .into_iter()
                    .next()
                    .unwrap_or_default(),
            };
            let names = header::resolve(&cells, options.header_keys)?;
            let width = names.len() as u32;
            if width < highest_column {
                warn!(
                    "header ends at column {}, ignoring columns up to {}",
                    position::column_letters(width),
                    position::column_letters(highest_column)
                );
                highest_column = width;
            }
            debug!("header: {:?}", names);
            Some(names)
        } else {
            None
        };

        let cursor = resume.map_or(first_data_row, |row| row.max(first_data_row));

        let mut session = Self {
            header,
            first_data_row,
            highest_row,
            highest_column,
            cursor,
            window: RowWindow::default(),
            pagination: Pagination::starting_at(cursor),
        };
        session.load_page(gateway, options)?;
        Ok(session)
    }

    /// Materialize the next page, replacing the window
    ///
    /// Returns the number of rows read, 0 once the sheet is exhausted.
    fn load_page(&mut self, gateway: &Gateway, options: &HandlerOptions) -> Result<u32> {
        let page_size = options.effective_page_size();
        let Some((start, end)) = self.pagination.next_range(page_size, self.highest_row) else {
            return Ok(0);
        };
        if self.highest_column == 0 {
            return Ok(0);
        }

        let range = CellRange::new(1, start, self.highest_column, end);
        let rows: Vec<Record> = gateway
            .read_range(&range)?
            .into_iter()
            .map(|values| self.to_record(values))
            .collect();

        let count = rows.len() as u32;
        self.window = RowWindow::new(start, rows);
        self.pagination.advance(start, count);
        debug!(
            "page {}: rows {}..={} ({} read this load)",
            self.pagination.pages_loaded, start, end, self.pagination.rows_read
        );
        Ok(count)
    }

    fn to_record(&self, values: Vec<CellValue>) -> Record {
        match &self.header {
            Some(names) => Record::Keyed(names.iter().cloned().zip(values).collect()),
            None => {
                let len = values
                    .iter()
                    .rposition(|value| !value.is_empty())
                    .map_or(0, |last| last + 1);
                Record::Plain(values[..len].iter().map(CellValue::trimmed).collect())
            }
        }
    }

    /// The record of `row`, paging as needed; `None` outside the data rows
    fn fetch(&mut self, gateway: &Gateway, options: &HandlerOptions, row: u32) -> Result<Option<Record>> {
        if row < self.first_data_row || row > self.highest_row {
            return Ok(None);
        }

        if !self.window.contains(row) && row < self.window.start() {
            trace!("row {} precedes the window, paging from it", row);
            self.pagination.rewind(row);
        }

        let page_size = options.effective_page_size();
        let mut attempts = self.pagination.remaining_pages(page_size, self.highest_row);
        while !self.window.contains(row) && attempts > 0 {
            if self.load_page(gateway, options)? == 0 {
                break;
            }
            attempts -= 1;
        }

        Ok(self.window.get(row).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::CellColors;
    use crate::options::ColorMode;
    use pretty_assertions::assert_eq;

    /// Header A..E and `rows` data rows; cell values are "r{row}c{col}"
    fn book(rows: u32) -> Spreadsheet {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        for (col, name) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            sheet.get_cell_mut((col as u32 + 1, 1u32)).set_value_string(*name);
        }
        for row in 2..=rows + 1 {
            for col in 1..=5u32 {
                sheet
                    .get_cell_mut((col, row))
                    .set_value_string(format!("r{}c{}", row, col));
            }
        }
        book
    }

    fn handler(rows: u32, options: HandlerOptions) -> SheetHandler {
        SheetHandler::from_spreadsheet(book(rows), options, LoadOptions::default()).unwrap()
    }

    fn cell(record: &Record, name: &str) -> String {
        record.get(name).map(|v| v.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_sequential_reads() {
        let mut sheet = handler(3, HandlerOptions::default());
        assert_eq!(sheet.header(), ["A", "B", "C", "D", "E"]);
        assert_eq!(sheet.current_row(), 2);

        for expected in 2..=4 {
            assert!(sheet.has_next());
            let row = sheet.get_row(None).unwrap();
            assert_eq!(cell(&row, "A"), format!("r{}c1", expected));
            assert_eq!(cell(&row, "E"), format!("r{}c5", expected));
        }

        assert!(!sheet.has_next());
        assert_eq!(sheet.get_row(None).unwrap(), Record::Keyed(Vec::new()));
        assert_eq!(sheet.current_row(), 5);
        assert!(!sheet.has_next());
    }

    #[test]
    fn test_explicit_fetch_advances_cursor_by_default() {
        let mut sheet = handler(5, HandlerOptions::default());
        let row = sheet.get_row(Some(5)).unwrap();
        assert_eq!(cell(&row, "B"), "r5c2");
        assert_eq!(sheet.current_row(), 3);

        let row = sheet.get_row(None).unwrap();
        assert_eq!(cell(&row, "B"), "r3c2");
    }

    #[test]
    fn test_sequential_only_policy() {
        let options = HandlerOptions::default().cursor_policy(CursorPolicy::SequentialOnly);
        let mut sheet = handler(5, options);
        sheet.get_row(Some(4)).unwrap();
        assert_eq!(sheet.current_row(), 2);
        sheet.get_row(None).unwrap();
        assert_eq!(sheet.current_row(), 3);
    }

    #[test]
    fn test_out_of_range_rows_are_empty() {
        let mut sheet = handler(3, HandlerOptions::default());
        assert!(sheet.get_row(Some(1)).unwrap().is_empty());
        assert!(sheet.get_row(Some(99)).unwrap().is_empty());
        assert_eq!(sheet.current_row(), 2);
        assert!(matches!(sheet.get_row(Some(0)), Err(Error::InvalidRowNumber(0))));
        assert!(matches!(
            sheet.get_row_full_info(Some(0)),
            Err(Error::InvalidRowNumber(0))
        ));
    }

    #[test]
    fn test_small_pages() {
        let options = HandlerOptions::default().page_size(2);
        let mut sheet = handler(7, options);
        assert_eq!(sheet.pages_loaded(), 1);
        assert_eq!(sheet.rows().len(), 2);

        let mut seen = Vec::new();
        while sheet.has_next() {
            let row = sheet.get_row(None).unwrap();
            seen.push(cell(&row, "A"));
        }
        let expected: Vec<String> = (2..=8).map(|r| format!("r{}c1", r)).collect();
        assert_eq!(seen, expected);
        assert_eq!(sheet.pages_loaded(), 4);
        assert_eq!(sheet.rows().start(), 8);
    }

    #[test]
    fn test_rewind_before_window() {
        let options = HandlerOptions::default().page_size(2);
        let mut sheet = handler(7, options);

        assert_eq!(cell(&sheet.get_row(Some(7)).unwrap(), "C"), "r7c3");
        assert!(!sheet.rows().contains(2));

        assert_eq!(cell(&sheet.get_row(Some(2)).unwrap(), "C"), "r2c3");
        assert_eq!(sheet.rows().start(), 2);
    }

    #[test]
    fn test_full_info() {
        let mut sheet = handler(2, HandlerOptions::default());
        sheet
            .set_text_color("E2", "FFFFFFFF")
            .unwrap()
            .set_fill_color("E2", FillColor::solid("FFED1C24").with_end("FF993300"))
            .unwrap();

        let row = sheet.get_row_full_info(Some(2)).unwrap();
        let info = row.get("E").unwrap();
        assert_eq!(info.value, CellValue::from("r2c5"));
        match &info.colors {
            CellColors::Argb(colors) => {
                assert_eq!(colors.font, "FFFFFFFF");
                assert_eq!(colors.fill.start, "FFED1C24");
                assert_eq!(colors.fill.end, "FF993300");
            }
            other => panic!("expected ARGB colors, got {:?}", other),
        }
        assert_eq!(sheet.current_row(), 3);
    }

    #[test]
    fn test_full_info_reads_the_row_it_fetched() {
        let mut sheet = handler(3, HandlerOptions::default());
        sheet.set_fill_color("A3", "FFED1C24").unwrap();
        sheet.get_row(None).unwrap();

        // The cursor row's colors, not the row after the cursor moved
        let row = sheet.get_row_full_info(None).unwrap();
        let a = row.get("A").unwrap();
        assert_eq!(a.value, CellValue::from("r3c1"));
        assert_eq!(a.colors.as_argb().unwrap().fill.start, "FFED1C24");
        assert_eq!(sheet.current_row(), 4);
    }

    #[test]
    fn test_full_info_named() {
        let options = HandlerOptions::default().color_mode(ColorMode::Named);
        let mut sheet = handler(1, options);
        sheet.paint_range("A2:E2", "FFED1C24", PaintTarget::Fill).unwrap();

        let row = sheet.get_row_full_info(None).unwrap();
        let named = row.get("C").unwrap().colors.as_named().copied().unwrap();
        assert_eq!(named.fill, crate::ColorName::Red);
        assert!(sheet.get_row_full_info(None).unwrap().is_empty());
    }

    #[test]
    fn test_no_header_mode() {
        let mut book = umya_spreadsheet::new_file();
        let ws = book.get_sheet_mut(&0).unwrap();
        ws.get_cell_mut("A1").set_value_string("  padded  ");
        ws.get_cell_mut("B1").set_value_number(4.0);
        ws.get_cell_mut("A2").set_value_string("x");
        ws.get_cell_mut("D2").set_value_string("last");

        let mut sheet =
            SheetHandler::from_spreadsheet(book, HandlerOptions::default(), LoadOptions::without_header())
                .unwrap();
        assert!(sheet.header().is_empty());
        assert_eq!(sheet.current_row(), 1);

        assert_eq!(
            sheet.get_row(None).unwrap(),
            Record::Plain(vec![CellValue::from("padded"), CellValue::Number(4.0)])
        );
        assert_eq!(
            sheet.get_row(None).unwrap(),
            Record::Plain(vec![
                CellValue::from("x"),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::from("last"),
            ])
        );
        assert!(!sheet.has_next());
        assert_eq!(sheet.get_row(None).unwrap(), Record::Plain(Vec::new()));
    }

    #[test]
    fn test_header_truncates_column_bound() {
        let mut book = book(1);
        let ws = book.get_sheet_mut(&0).unwrap();
        ws.get_style_mut("H1").get_font_mut().set_bold(true);
        ws.get_cell_mut("H2").set_value_string("stray");

        let mut sheet = SheetHandler::from_spreadsheet(book, HandlerOptions::default(), LoadOptions::default()).unwrap();
        assert_eq!(sheet.header().len(), 5);
        assert_eq!(sheet.highest_column(), "E");
        assert_eq!(sheet.get_row(None).unwrap().len(), 5);
    }

    #[test]
    fn test_empty_header_fails() {
        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_mut(&0).unwrap().get_cell_mut("A2").set_value_number(1.0);
        let result = SheetHandler::from_spreadsheet(book, HandlerOptions::default(), LoadOptions::default());
        assert!(matches!(result, Err(Error::EmptyHeader)));

        let result = SheetHandler::from_spreadsheet(
            umya_spreadsheet::new_file(),
            HandlerOptions::default(),
            LoadOptions::default(),
        );
        assert!(matches!(result, Err(Error::EmptyHeader)));
    }

    #[test]
    fn test_empty_sheet_without_header() {
        let mut sheet = SheetHandler::from_spreadsheet(
            umya_spreadsheet::new_file(),
            HandlerOptions::default(),
            LoadOptions::without_header(),
        )
        .unwrap();
        assert!(!sheet.has_next());
        assert!(sheet.rows().is_empty());
        assert!(sheet.get_row(None).unwrap().is_empty());
    }

    #[test]
    fn test_writes_are_not_visible_until_reload() {
        let mut sheet = handler(2, HandlerOptions::default());
        sheet.write_cell("A2", "changed").unwrap();
        assert_eq!(cell(&sheet.get_row(Some(2)).unwrap(), "A"), "r2c1");
        assert_eq!(
            sheet.gateway().read_cell("A2").unwrap(),
            CellValue::from("changed")
        );
    }
}
