//! Row records

use crate::colors::CellColors;
use crate::value::CellValue;

/// One data row
///
/// In header mode the row is keyed by header name, in header order. Names
/// are unique by position only, so a key may repeat; [`Record::get`]
/// returns the first match. Without a header the row is a plain list with
/// trailing empty cells removed.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<T = CellValue> {
    Keyed(Vec<(String, T)>),
    Plain(Vec<T>),
}

/// A cell value together with its colors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellInfo {
    pub value: CellValue,
    pub colors: CellColors,
}

impl<T> Record<T> {
    /// An empty record of the given shape
    pub fn empty(keyed: bool) -> Self {
        if keyed {
            Record::Keyed(Vec::new())
        } else {
            Record::Plain(Vec::new())
        }
    }

    /// Check whether this record is keyed by header names
    pub fn is_keyed(&self) -> bool {
        matches!(self, Record::Keyed(_))
    }

    /// Value of the first column with this name (always `None` without a header)
    pub fn get(&self, name: &str) -> Option<&T> {
        match self {
            Record::Keyed(entries) => entries.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            Record::Plain(_) => None,
        }
    }

    /// Value at a 0-based position
    pub fn get_index(&self, index: usize) -> Option<&T> {
        match self {
            Record::Keyed(entries) => entries.get(index).map(|(_, v)| v),
            Record::Plain(values) => values.get(index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Record::Keyed(entries) => entries.len(),
            Record::Plain(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Header names in column order (empty without a header)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let entries: &[(String, T)] = match self {
            Record::Keyed(entries) => entries,
            Record::Plain(_) => &[],
        };
        entries.iter().map(|(k, _)| k.as_str())
    }

    /// Values in column order
    pub fn values(&self) -> Values<'_, T> {
        match self {
            Record::Keyed(entries) => Values::Keyed(entries.iter()),
            Record::Plain(values) => Values::Plain(values.iter()),
        }
    }

    /// Replace every value, passing its 1-based column position
    pub fn map_indexed<U, F>(self, mut f: F) -> Record<U>
    where
        F: FnMut(u32, T) -> U,
    {
        match self.try_map_indexed(|column, value| Ok::<U, std::convert::Infallible>(f(column, value))) {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    /// Fallible [`Record::map_indexed`], stopping at the first error
    pub fn try_map_indexed<U, E, F>(self, mut f: F) -> Result<Record<U>, E>
    where
        F: FnMut(u32, T) -> Result<U, E>,
    {
        match self {
            Record::Keyed(entries) => entries
                .into_iter()
                .zip(1u32..)
                .map(|((key, value), column)| f(column, value).map(|mapped| (key, mapped)))
                .collect::<Result<Vec<_>, E>>()
                .map(Record::Keyed),
            Record::Plain(values) => values
                .into_iter()
                .zip(1u32..)
                .map(|(value, column)| f(column, value))
                .collect::<Result<Vec<_>, E>>()
                .map(Record::Plain),
        }
    }
}

impl<T> Default for Record<T> {
    fn default() -> Self {
        Record::Plain(Vec::new())
    }
}

/// Iterator over the values of a [`Record`]
pub enum Values<'a, T> {
    Keyed(std::slice::Iter<'a, (String, T)>),
    Plain(std::slice::Iter<'a, T>),
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Values::Keyed(iter) => iter.next().map(|(_, v)| v),
            Values::Plain(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Values::Keyed(iter) => iter.size_hint(),
            Values::Plain(iter) => iter.size_hint(),
        }
    }
}

/// Keyed records serialize as JSON-style objects, plain records as arrays.
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Record<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Record::Keyed(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Record::Plain(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}
