//! Conversion between (column index, row number) pairs and A1 addresses
//!
//! Both coordinates are 1-based here, matching how rows are numbered by the
//! handler: column 3, row 5 is `"C5"`.

use crate::error::{Error, Result};

/// Last row of a worksheet
pub const MAX_ROW: u32 = 1_048_576;
/// Last column of a worksheet (`XFD`)
pub const MAX_COLUMN: u32 = 16_384;

/// Letters for a 1-based column index (1 = A, 26 = Z, 27 = AA)
///
/// Index 0 has no letters and yields an empty string.
pub fn column_letters(column_index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column_index;
    while n > 0 {
        letters.push(b'A' + ((n - 1) % 26) as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Build the A1 address of a 1-based column index and row number
///
/// ```
/// assert_eq!(rowsheet::position::to_address(3, 5), "C5");
/// assert_eq!(rowsheet::position::to_address(28, 10), "AB10");
/// ```
pub fn to_address(column_index: u32, row: u32) -> String {
    format!("{}{}", column_letters(column_index), row)
}

/// Split an A1 address into its 1-based column index and row number
///
/// `$` anchors are accepted and ignored.
pub fn from_address(address: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidAddress(address.to_string());

    let body = address.trim();
    let body = body.strip_prefix('$').unwrap_or(body);
    let split = body
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(invalid)?;
    let (letters, digits) = body.split_at(split);
    let digits = digits.strip_prefix('$').unwrap_or(digits);

    if letters.is_empty() || letters.len() > 3 || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let column = letters
        .bytes()
        .fold(0u32, |acc, b| acc * 26 + (b.to_ascii_uppercase() - b'A' + 1) as u32);
    let row: u32 = digits.parse().map_err(|_| invalid())?;

    if column > MAX_COLUMN || row == 0 || row > MAX_ROW {
        return Err(invalid());
    }
    Ok((column, row))
}

/// Rectangle of cells, inclusive on both ends, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_column: u32,
    pub first_row: u32,
    pub last_column: u32,
    pub last_row: u32,
}

impl CellRange {
    /// Range between two corners, in any order
    pub fn new(first_column: u32, first_row: u32, last_column: u32, last_row: u32) -> Self {
        Self {
            first_column: first_column.min(last_column),
            first_row: first_row.min(last_row),
            last_column: first_column.max(last_column),
            last_row: first_row.max(last_row),
        }
    }

    /// Parse `"A2:C4"`, or a lone address such as `"B7"`
    pub fn parse(range: &str) -> Result<Self> {
        let (first, last) = match range.split_once(':') {
            Some((first, last)) => (from_address(first)?, from_address(last)?),
            None => {
                let cell = from_address(range)?;
                (cell, cell)
            }
        };
        Ok(Self::new(first.0, first.1, last.0, last.1))
    }

    /// Cells row by row, as (column index, row number)
    pub fn cells(self) -> impl Iterator<Item = (u32, u32)> {
        let (first_column, last_column) = (self.first_column, self.last_column);
        (self.first_row..=self.last_row)
            .flat_map(move |row| (first_column..=last_column).map(move |column| (column, row)))
    }

    pub fn width(&self) -> u32 {
        self.last_column - self.first_column + 1
    }

    pub fn height(&self) -> u32 {
        self.last_row - self.first_row + 1
    }
}
