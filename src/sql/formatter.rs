//! Row-to-SQL formatter
//!
//! Turns a [`Dataset`] into `INSERT` statement text. The formatter is a pure
//! function of its inputs: no I/O, no shared state, byte-identical output for
//! identical inputs.

use tracing::debug;

use super::dialect::{MsSqlDialect, SqlDialect};
use super::options::{BlankPolicy, GroupingMode};
use super::FormatError;
use crate::types::{CellValue, Dataset, Row};

/// Generate INSERT statements using MS SQL Server quoting (`[name]`).
pub fn generate(
    dataset: &Dataset,
    table_name: &str,
    blank_policy: BlankPolicy,
    grouping: GroupingMode,
) -> Result<String, FormatError> {
    generate_with(dataset, table_name, blank_policy, grouping, &MsSqlDialect)
}

/// Generate INSERT statements with the quoting rules of `dialect`.
pub fn generate_with(
    dataset: &Dataset,
    table_name: &str,
    blank_policy: BlankPolicy,
    grouping: GroupingMode,
    dialect: &dyn SqlDialect,
) -> Result<String, FormatError> {
    dataset.check_shape()?;

    debug!(
        "Formatting {} rows x {} columns for {} ({}, {})",
        dataset.row_count(),
        dataset.columns.len(),
        table_name,
        grouping,
        dialect.name()
    );

    let table = dialect.quote_identifier(table_name);
    let cols = column_list(&dataset.columns, dialect);

    let sql = match grouping {
        GroupingMode::MultiRowSingleStatement => {
            let tuples: Vec<String> = dataset
                .rows
                .iter()
                .map(|row| row_tuple(row, blank_policy, dialect))
                .collect();
            format!(
                "INSERT INTO {} ({})\nVALUES\n{};",
                table,
                cols,
                tuples.join(",\n")
            )
        }
        GroupingMode::OnePerRow => {
            let statements: Vec<String> = dataset
                .rows
                .iter()
                .map(|row| {
                    format!(
                        "INSERT INTO {} ({}) VALUES {};",
                        table,
                        cols,
                        row_tuple(row, blank_policy, dialect)
                    )
                })
                .collect();
            statements.join("\n")
        }
    };

    Ok(sql)
}

/// Quote every column name and join them in order.
pub fn column_list(columns: &[String], dialect: &dyn SqlDialect) -> String {
    columns
        .iter()
        .map(|c| dialect.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format one row as a parenthesised value tuple.
pub fn row_tuple(row: &Row, blank_policy: BlankPolicy, dialect: &dyn SqlDialect) -> String {
    let values: Vec<String> = row
        .values
        .iter()
        .map(|v| process_value(v, blank_policy, dialect))
        .collect();
    format!("({})", values.join(", "))
}

/// Format a single cell as a SQL literal.
pub fn process_value(value: &CellValue, blank_policy: BlankPolicy, dialect: &dyn SqlDialect) -> String {
    if value.is_blank() {
        return match blank_policy {
            BlankPolicy::AsNull => "NULL".to_string(),
            BlankPolicy::AsEmptyString => "''".to_string(),
        };
    }
    dialect.quote_literal(&value.to_string())
}
