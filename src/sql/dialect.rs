//! Identifier quoting and literal escaping per SQL dialect

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FormatError;

/// Quoting rules for one SQL dialect family.
pub trait SqlDialect: Send + Sync {
    /// Dialect display name (used in logs).
    fn name(&self) -> &'static str;

    /// Wrap a table or column name in the dialect's identifier delimiters.
    /// The name is wrapped verbatim; embedded delimiters are not escaped.
    fn quote_identifier(&self, name: &str) -> String;

    /// Turn text into a string literal.
    fn quote_literal(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }
}

pub struct MsSqlDialect;

impl SqlDialect for MsSqlDialect {
    fn name(&self) -> &'static str {
        "MS SQL Server"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name)
    }
}

pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name)
    }
}

pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name)
    }
}

/// Selectable dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialectKind {
    #[default]
    MsSql,
    Postgres,
    MySql,
}

impl DialectKind {
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            DialectKind::MsSql => &MsSqlDialect,
            DialectKind::Postgres => &PostgresDialect,
            DialectKind::MySql => &MySqlDialect,
        }
    }
}

impl FromStr for DialectKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mssql" | "sqlserver" | "tsql" => Ok(DialectKind::MsSql),
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "mysql" | "mariadb" => Ok(DialectKind::MySql),
            _ => Err(FormatError::InvalidConfiguration {
                field: "dialect",
                value: s.to_string(),
                allowed: "one of: mssql, postgres, mysql",
            }),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectKind::MsSql => write!(f, "mssql"),
            DialectKind::Postgres => write!(f, "postgres"),
            DialectKind::MySql => write!(f, "mysql"),
        }
    }
}
