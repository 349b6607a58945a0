//! Style lookup: reading and painting cell colors through the gateway

use crate::colors::{fill_argb, font_argb, parse_argb, ArgbColors, CellColors, ColorName, FillColor, NamedColors};
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::options::ColorMode;
use crate::position::{self, CellRange};

/// Colors of the cell at a 1-based column index and row number
pub fn get_colors(gateway: &Gateway, row: u32, column_index: u32, mode: ColorMode) -> Result<CellColors> {
    if row == 0 {
        return Err(Error::InvalidRowNumber(row));
    }
    if column_index == 0 || column_index > position::MAX_COLUMN {
        return Err(Error::InvalidAddress(position::to_address(column_index, row)));
    }

    let font = font_argb(gateway.font_color(column_index, row)?.as_deref());
    let (start, end) = gateway.fill_colors(column_index, row)?;
    let fill = fill_argb(start.as_deref(), end.as_deref());

    Ok(match mode {
        ColorMode::Argb => CellColors::Argb(ArgbColors { font, fill }),
        ColorMode::Named => CellColors::Named(NamedColors {
            font: ColorName::classify(&font),
            fill: ColorName::classify(&fill.end),
        }),
    })
}

/// Set the font color of every cell in `range`
pub fn set_text_color(gateway: &mut Gateway, range: &str, argb: &str) -> Result<()> {
    let range = CellRange::parse(range)?;
    let argb = parse_argb(argb)?;
    gateway.set_font_color(&range, &argb)
}

/// Fill every cell in `range`, writing only the stops that are given
///
/// Cells are switched to a solid fill first so the color renders.
pub fn set_fill_color(gateway: &mut Gateway, range: &str, fill: &FillColor) -> Result<()> {
    let range = CellRange::parse(range)?;
    let (start, end) = fill.parse()?;

    gateway.enable_solid_fill(&range)?;
    if let Some(start) = start {
        gateway.set_fill_start(&range, &start)?;
    }
    if let Some(end) = end {
        gateway.set_fill_end(&range, &end)?;
    }
    Ok(())
}
