use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{header_name, normalize_headers, SourceOptions};
use crate::types::{CellValue, Dataset, Row};

/// Read a delimited text file. Cells are kept as text; empty cells and
/// configured NA markers become `Absent`.
pub fn read_delimited(path: &Path, options: &SourceOptions) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    parse_delimited(file, options).with_context(|| format!("Failed to read {}", path.display()))
}

pub(crate) fn parse_delimited<R: Read>(reader: R, options: &SourceOptions) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to parse header row")?.clone();
    let columns = normalize_headers(
        headers
            .iter()
            .map(|h| header_name(&CellValue::from_text(h)))
            .collect(),
    );
    if columns.is_empty() {
        return Err(anyhow!("No columns found in header row"));
    }
    let width = columns.len();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to parse record")?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(anyhow!(
                "Line {}: expected {} fields, saw {}",
                line,
                width,
                record.len()
            ));
        }

        let mut values: Vec<CellValue> = record
            .iter()
            .map(|field| text_cell(field, &options.na_values))
            .collect();
        values.resize(width, CellValue::Absent);
        rows.push(Row::new(values));
    }

    Ok(Dataset::new(columns, rows)?)
}

fn text_cell(field: &str, na_values: &[String]) -> CellValue {
    if na_values.iter().any(|na| na == field.trim()) {
        CellValue::Absent
    } else {
        CellValue::from_text(field)
    }
}
