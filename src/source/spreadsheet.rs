use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

use super::{header_name, normalize_headers};
use crate::types::{CellValue, Dataset, Row};

/// Sheet names of a workbook, in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    Ok(workbook.sheet_names())
}

/// Read one sheet (the first when `sheet` is `None`). Returns the dataset and
/// the name of the sheet that was read.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<(Dataset, String)> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| {
                anyhow!(
                    "Sheet '{}' not found in {}. Available sheets: {}",
                    wanted,
                    path.display(),
                    names.join(", ")
                )
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("Workbook {} has no sheets", path.display()))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .with_context(|| format!("Failed to read sheet '{}' of {}", name, path.display()))?;
    debug!("Sheet '{}' has {} rows", name, range.height());

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| anyhow!("Sheet '{}' is empty", name))?;
    let columns = normalize_headers(header.iter().map(|c| header_name(&cell_from_data(c))).collect());

    let rows = rows
        .map(|cells| Row::new(cells.iter().map(cell_from_data).collect()))
        .collect();

    let dataset = Dataset::new(columns, rows)
        .with_context(|| format!("Sheet '{}' has an inconsistent shape", name))?;
    Ok((dataset, name))
}

/// Map a spreadsheet cell to a cell value. Integral floats become integers,
/// since spreadsheets store every number as a float.
pub(crate) fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Absent,
        Data::String(s) => CellValue::from_text(s),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => number_cell(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                number_cell(dt.as_f64())
            } else {
                dt.as_datetime()
                    .map(CellValue::Timestamp)
                    .unwrap_or_else(|| number_cell(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn number_cell(f: f64) -> CellValue {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        CellValue::Integer(f as i64)
    } else {
        CellValue::Float(f)
    }
}
