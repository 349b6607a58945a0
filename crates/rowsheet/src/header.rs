//! Header resolution from the first row

use crate::error::{Error, Result};
use crate::options::HeaderKeys;
use crate::value::CellValue;

/// Marker some templates append to required column names
const REQUIRED_MARKER: &str = " (*)";

/// Column names from the raw cells of row 1
///
/// Names are taken left to right up to the first empty cell, which marks
/// the real right edge of the table. The returned width is the number of
/// names. Fails with [`Error::EmptyHeader`] when no name precedes that edge.
pub(crate) fn resolve(cells: &[CellValue], keys: HeaderKeys) -> Result<Vec<String>> {
    let names: Vec<String> = cells
        .iter()
        .take_while(|value| !value.is_empty())
        .map(|value| header_name(value, keys))
        .collect();

    if names.is_empty() {
        return Err(Error::EmptyHeader);
    }
    Ok(names)
}

fn header_name(value: &CellValue, keys: HeaderKeys) -> String {
    let text = value.to_string();
    match keys {
        HeaderKeys::Trimmed => text.trim().to_string(),
        HeaderKeys::Normalized => normalize(&text),
    }
}

/// `"Product Name (*)"` -> `"product_name"`
pub(crate) fn normalize(name: &str) -> String {
    name.trim()
        .replace(REQUIRED_MARKER, "")
        .replace(' ', "_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::from(*v)
                }
            })
            .collect()
    }

    #[test]
    fn test_trimmed_names() {
        let names = resolve(&cells(&[" Name ", "Qty", "Price\t"]), HeaderKeys::Trimmed).unwrap();
        assert_eq!(names, vec!["Name", "Qty", "Price"]);
    }

    #[test]
    fn test_stops_at_first_empty_cell() {
        let names = resolve(&cells(&["A", "B", "", "D"]), HeaderKeys::Trimmed).unwrap();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_non_text_headers() {
        let names = resolve(
            &[CellValue::Number(2024.0), CellValue::Boolean(true)],
            HeaderKeys::Trimmed,
        )
        .unwrap();
        assert_eq!(names, vec!["2024", "TRUE"]);
    }

    #[test]
    fn test_empty_header() {
        assert!(matches!(
            resolve(&[], HeaderKeys::Trimmed),
            Err(Error::EmptyHeader)
        ));
        assert!(matches!(
            resolve(&cells(&["", "B"]), HeaderKeys::Trimmed),
            Err(Error::EmptyHeader)
        ));
    }

    #[test]
    fn test_normalized_names() {
        assert_eq!(normalize(" Product Name (*) "), "product_name");
        assert_eq!(normalize("SKU"), "sku");
        assert_eq!(normalize("Unit Price (*) Net"), "unit_price_net");
        let names = resolve(&cells(&["Nome (*)", "Preço Unitário"]), HeaderKeys::Normalized).unwrap();
        assert_eq!(names, vec!["nome", "preço_unitário"]);
    }
}
