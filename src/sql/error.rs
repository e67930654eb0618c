//! Errors raised while formatting INSERT statements

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("row {row} has {found} values but the dataset has {expected} columns")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("dataset has no columns")]
    NoColumns,
    #[error("invalid {field}: '{value}' (expected {allowed})")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}
