//! The resident block of rows and the paging state behind it

use crate::record::Record;

/// Contiguous block of materialized rows
///
/// Holds rows `start ..= start + len - 1`. Each page replaces the window
/// wholesale, so a row outside it must be paged in again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowWindow {
    start: u32,
    rows: Vec<Record>,
}

impl RowWindow {
    pub(crate) fn new(start: u32, rows: Vec<Record>) -> Self {
        Self { start, rows }
    }

    /// First row number held, meaningless when the window is empty
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last row number held
    pub fn end(&self) -> Option<u32> {
        match self.rows.len() as u32 {
            0 => None,
            n => Some(self.start + n - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: u32) -> bool {
        self.get(row).is_some()
    }

    /// The record of an absolute row number
    pub fn get(&self, row: u32) -> Option<&Record> {
        let offset = row.checked_sub(self.start)?;
        self.rows.get(offset as usize)
    }

    /// Rows with their absolute row numbers, in order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Record)> {
        (self.start..).zip(self.rows.iter())
    }

    /// Records in row order
    pub fn records(&self) -> &[Record] {
        &self.rows
    }
}

/// Where the next page starts and how much has been read this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// First row of the next page
    pub next_row: u32,
    /// Rows materialized since the load, counting re-reads
    pub rows_read: u64,
    /// Pages materialized since the load
    pub pages_loaded: u32,
}

impl Pagination {
    pub(crate) fn starting_at(row: u32) -> Self {
        Self {
            next_row: row,
            rows_read: 0,
            pages_loaded: 0,
        }
    }

    /// Inclusive row span of the next page, `None` once past `highest_row`
    pub fn next_range(&self, page_size: u32, highest_row: u32) -> Option<(u32, u32)> {
        if self.next_row == 0 || self.next_row > highest_row {
            return None;
        }
        let end = self
            .next_row
            .saturating_add(page_size.max(1) - 1)
            .min(highest_row);
        Some((self.next_row, end))
    }

    /// Pages still needed to reach `highest_row`
    pub fn remaining_pages(&self, page_size: u32, highest_row: u32) -> u32 {
        if self.next_row == 0 || self.next_row > highest_row {
            return 0;
        }
        let remaining = (highest_row - self.next_row) as u64 + 1;
        let page_size = page_size.max(1) as u64;
        ((remaining + page_size - 1) / page_size) as u32
    }

    pub(crate) fn advance(&mut self, start: u32, count: u32) {
        self.next_row = start.saturating_add(count);
        self.rows_read += count as u64;
        self.pages_loaded += 1;
    }

    pub(crate) fn rewind(&mut self, row: u32) {
        self.next_row = row;
    }
}
