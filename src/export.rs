// 📤 CSV Export - flat-file snapshot of the catalog
//
// Format: header line, then `id,name,quantity,price,weight,unit` per item in
// catalog order. Fields are written raw: commas inside names or units are not
// quoted or escaped.
//
// Floats use the shortest text that parses back to the same value, always
// with a fractional part (3 -> "3.0", 0.1 -> "0.1").

use crate::error::{InventoryError, Result};
use crate::item::Item;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const HEADER: [&str; 6] = ["ID", "Name", "Quantity", "Price", "Weight", "Unit"];

/// One parsed row of an export file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportRecord {
    #[serde(rename = "ID")]
    pub id: i32,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Quantity")]
    pub quantity: i32,

    #[serde(rename = "Price")]
    pub price: f64,

    #[serde(rename = "Weight")]
    pub weight: f64,

    #[serde(rename = "Unit")]
    pub unit: String,
}

impl From<&Item> for ExportRecord {
    fn from(item: &Item) -> Self {
        ExportRecord {
            id: item.id(),
            name: item.name().to_string(),
            quantity: item.quantity(),
            price: item.price(),
            weight: item.weight(),
            unit: item.unit().to_string(),
        }
    }
}

/// Decimal text for export files.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Render the export file contents in memory.
pub fn render_csv(items: &[Item]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for item in items {
        writer.write_record([
            item.id().to_string(),
            item.name().to_string(),
            item.quantity().to_string(),
            format_decimal(item.price()),
            format_decimal(item.weight()),
            item.unit().to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| InventoryError::Csv(csv::Error::from(err.into_error())))
}

/// Write the export file, replacing anything already at `path`.
///
/// The whole file is rendered before the destination is touched.
pub fn write_csv(items: &[Item], path: &Path) -> Result<()> {
    let bytes = render_csv(items)?;
    fs::write(path, bytes).map_err(|err| InventoryError::io(path, err))?;
    Ok(())
}

/// Parse an export file back into records.
pub fn read_csv(path: &Path) -> Result<Vec<ExportRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: ExportRecord = result?;
        records.push(record);
    }

    Ok(records)
}
