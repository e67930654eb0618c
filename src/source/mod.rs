//! Tabular file loading
//!
//! Reads delimited text and spreadsheet files into a [`Dataset`]. The first
//! row is always the header.

mod delimited;
mod spreadsheet;

pub use delimited::read_delimited;
pub use spreadsheet::{list_sheets, read_sheet};

use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::types::{CellValue, Dataset};

/// A dataset together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub dataset: Dataset,
    /// File name, for display
    pub source_name: String,
    /// Table name used when the user gives none: the file stem
    pub default_table_name: String,
    pub sheet: Option<String>,
}

/// Cell texts that spreadsheet and dataframe tools read as missing by default
pub const STANDARD_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Spreadsheet sheet to read; the first sheet when unset
    pub sheet: Option<String>,
    /// Field delimiter for delimited text
    pub delimiter: u8,
    /// Cell texts treated as blank in delimited text
    pub na_values: Vec<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            delimiter: b',',
            na_values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Delimited,
    Spreadsheet,
}

impl SourceKind {
    /// Anything that is not a known spreadsheet extension is read as delimited text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                SourceKind::Spreadsheet
            }
            _ => SourceKind::Delimited,
        }
    }
}

/// Load a file into a dataset.
pub fn load(path: &Path, options: &SourceOptions) -> Result<LoadedSource> {
    let kind = SourceKind::from_path(path);
    debug!("Reading {} as {:?}", path.display(), kind);

    let (dataset, sheet) = match kind {
        SourceKind::Delimited => {
            if options.sheet.is_some() {
                return Err(anyhow!(
                    "{} is not a spreadsheet; --sheet does not apply",
                    path.display()
                ));
            }
            (read_delimited(path, options)?, None)
        }
        SourceKind::Spreadsheet => {
            let (dataset, sheet) = read_sheet(path, options.sheet.as_deref())?;
            (dataset, Some(sheet))
        }
    };

    Ok(LoadedSource {
        dataset,
        source_name: file_name(path),
        default_table_name: default_table_name(path),
        sheet,
    })
}

/// The file stem, used as the table name when none is given.
pub fn default_table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Make header names usable as column names: blank headers become
/// `Unnamed: N` and repeated names get `.1`, `.2`, ... suffixes.
pub fn normalize_headers(raw: Vec<Option<String>>) -> Vec<String> {
    let named: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, name)| match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => format!("Unnamed: {}", idx),
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(named.len());
    for name in named {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        result.push(candidate);
    }
    result
}

/// Header text of a cell, or `None` when the cell is blank
fn header_name(cell: &CellValue) -> Option<String> {
    if cell.is_blank() {
        None
    } else {
        Some(cell.to_string())
    }
}
