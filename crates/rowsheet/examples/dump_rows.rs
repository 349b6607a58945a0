//! Print the rows of a workbook with their colors
//!
//! Usage: cargo run --example dump_rows -- <file.xlsx> [row]

use anyhow::{bail, Context};
use rowsheet::prelude::*;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: dump_rows <file.xlsx> [row]");
    };
    let row: Option<u32> = args
        .next()
        .map(|r| r.parse())
        .transpose()
        .context("row must be a positive number")?;

    let mut sheet = SheetHandler::open_with(
        &path,
        HandlerOptions::new().color_mode(ColorMode::Named),
        LoadOptions::default(),
    )
    .with_context(|| format!("failed to open {}", path))?;

    println!(
        "{}: rows {}..={}, columns A..{}",
        path,
        sheet.first_data_row(),
        sheet.highest_row(),
        sheet.highest_column()
    );
    println!("header: {}", sheet.header().join(" | "));

    if let Some(line) = row {
        let record = sheet.get_row_full_info(Some(line))?;
        for (name, info) in sheet.header().iter().zip(record.values()) {
            let colors = info.colors.as_named().map(|c| (c.font.as_str(), c.fill.as_str()));
            println!("{:>12}: {:<24} {:?}", name, info.value.to_string(), colors);
        }
        return Ok(());
    }

    while sheet.has_next() {
        let line = sheet.current_row();
        let record = sheet.get_row(None)?;
        let cells: Vec<String> = record.values().map(|v| v.to_string()).collect();
        println!("{:>6}: {}", line, cells.join(" | "));
    }
    Ok(())
}
