//! Generation options: blank-cell policy, statement grouping, table name

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FormatError;

/// How blank cells are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlankPolicy {
    #[default]
    AsNull,
    AsEmptyString,
}

impl FromStr for BlankPolicy {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" | "as_null" => Ok(BlankPolicy::AsNull),
            "empty" | "empty_string" | "as_empty_string" => Ok(BlankPolicy::AsEmptyString),
            _ => Err(FormatError::InvalidConfiguration {
                field: "blank policy",
                value: s.to_string(),
                allowed: "one of: null, empty",
            }),
        }
    }
}

impl fmt::Display for BlankPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlankPolicy::AsNull => write!(f, "null"),
            BlankPolicy::AsEmptyString => write!(f, "empty"),
        }
    }
}

/// Whether each row gets its own statement or all rows share one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupingMode {
    #[default]
    OnePerRow,
    MultiRowSingleStatement,
}

impl FromStr for GroupingMode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "one_per_row" => Ok(GroupingMode::OnePerRow),
            "multi" | "multi_row" | "multi_row_single_statement" => {
                Ok(GroupingMode::MultiRowSingleStatement)
            }
            _ => Err(FormatError::InvalidConfiguration {
                field: "grouping mode",
                value: s.to_string(),
                allowed: "one of: single, multi",
            }),
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingMode::OnePerRow => write!(f, "single"),
            GroupingMode::MultiRowSingleStatement => write!(f, "multi"),
        }
    }
}

/// Options for one generation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// User supplied table name; blank means "use the default"
    pub table_name: Option<String>,
    pub blank_policy: BlankPolicy,
    pub grouping: GroupingMode,
}

impl GenerateOptions {
    /// Resolve the target table: the trimmed user value, else the trimmed default.
    pub fn resolve_table_name(&self, default_name: &str) -> Result<String, FormatError> {
        let user = self.table_name.as_deref().map(str::trim).unwrap_or("");
        let name = if user.is_empty() {
            default_name.trim()
        } else {
            user
        };
        if name.is_empty() {
            return Err(FormatError::InvalidConfiguration {
                field: "table name",
                value: String::new(),
                allowed: "a non-empty name",
            });
        }
        Ok(name.to_string())
    }
}
