//! Command-line and environment configuration

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::sql::{BlankPolicy, DialectKind, GenerateOptions, GroupingMode, DEFAULT_PREVIEW_ROWS};
use crate::source::{SourceOptions, STANDARD_NA_VALUES};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert CSV and spreadsheet files into SQL INSERT statements")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true, env = "SQLGEN_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the sheets of a spreadsheet file.
    Sheets {
        /// Spreadsheet file path.
        file: PathBuf,
    },
    /// Show the first rows of a file.
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Number of rows to show.
        #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
        rows: usize,

        /// Print the preview as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate INSERT statements.
    Generate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        sql: SqlArgs,

        /// Output file or directory. Prints to stdout when omitted.
        #[arg(short, long, env = "SQLGEN_OUTPUT")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input file (.csv, .xlsx, .xls, .ods, ...).
    pub file: PathBuf,

    /// Sheet to read from a spreadsheet (default: first sheet).
    #[arg(long)]
    pub sheet: Option<String>,

    /// Field delimiter for delimited text.
    #[arg(long, default_value_t = ',', env = "SQLGEN_DELIMITER")]
    pub delimiter: char,

    /// Cell text to treat as blank (repeatable).
    #[arg(long = "na-value")]
    pub na_values: Vec<String>,

    /// Also treat the usual missing-value markers (NA, N/A, NaN, null, #N/A, ...) as blank.
    #[arg(long, env = "SQLGEN_STANDARD_NA")]
    pub standard_na: bool,
}

impl InputArgs {
    pub fn source_options(&self) -> Result<SourceOptions> {
        if !self.delimiter.is_ascii() {
            return Err(anyhow!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ));
        }
        let mut na_values = self.na_values.clone();
        if self.standard_na {
            na_values.extend(STANDARD_NA_VALUES.iter().map(|v| v.to_string()));
        }
        Ok(SourceOptions {
            sheet: self.sheet.clone(),
            delimiter: self.delimiter as u8,
            na_values,
        })
    }
}

#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Target table name (default: input file name without extension).
    #[arg(short, long, env = "SQLGEN_TABLE")]
    pub table: Option<String>,

    /// Blank cells: null | empty.
    #[arg(long, default_value = "null", env = "SQLGEN_BLANKS")]
    pub blanks: String,

    /// Statement grouping: single | multi.
    #[arg(long, default_value = "single", env = "SQLGEN_MODE")]
    pub mode: String,

    /// Identifier quoting: mssql | postgres | mysql.
    #[arg(long, default_value = "mssql", env = "SQLGEN_DIALECT")]
    pub dialect: String,
}

impl SqlArgs {
    pub fn generate_options(&self) -> Result<GenerateOptions> {
        Ok(GenerateOptions {
            table_name: self.table.clone(),
            blank_policy: self.blanks.parse::<BlankPolicy>()?,
            grouping: self.mode.parse::<GroupingMode>()?,
        })
    }

    pub fn dialect(&self) -> Result<DialectKind> {
        Ok(self.dialect.parse::<DialectKind>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "sql-insert-gen",
            "generate",
            "data.csv",
            "--table",
            "people",
            "--blanks",
            "empty",
            "--mode",
            "multi",
            "--dialect",
            "postgres",
            "-o",
            "out.sql",
        ])
        .unwrap();

        match cli.command {
            Command::Generate { input, sql, output } => {
                assert_eq!(input.file, PathBuf::from("data.csv"));
                let opts = sql.generate_options().unwrap();
                assert_eq!(opts.table_name.as_deref(), Some("people"));
                assert_eq!(opts.blank_policy, BlankPolicy::AsEmptyString);
                assert_eq!(opts.grouping, GroupingMode::MultiRowSingleStatement);
                assert_eq!(sql.dialect().unwrap(), DialectKind::Postgres);
                assert_eq!(output, Some(PathBuf::from("out.sql")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_option_values() {
        let cli = Cli::try_parse_from([
            "sql-insert-gen",
            "generate",
            "data.csv",
            "--blanks",
            "zero",
        ])
        .unwrap();
        let Command::Generate { sql, .. } = cli.command else {
            panic!("expected generate");
        };
        let err = sql.generate_options().unwrap_err();
        assert!(err.to_string().contains("blank policy"));
    }

    #[test]
    fn test_preview_defaults() {
        let cli = Cli::try_parse_from(["sql-insert-gen", "preview", "book.xlsx", "--sheet", "Q1"])
            .unwrap();
        let Command::Preview { input, rows, json } = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(rows, DEFAULT_PREVIEW_ROWS);
        assert!(!json);
        let opts = input.source_options().unwrap();
        assert_eq!(opts.sheet.as_deref(), Some("Q1"));
        assert_eq!(opts.delimiter, b',');
    }

    #[test]
    fn test_standard_na_markers() {
        let cli = Cli::try_parse_from([
            "sql-insert-gen",
            "preview",
            "a.csv",
            "--na-value",
            "-",
            "--standard-na",
        ])
        .unwrap();
        let Command::Preview { input, .. } = cli.command else {
            panic!("expected preview");
        };
        let opts = input.source_options().unwrap();
        assert_eq!(opts.na_values[0], "-");
        for marker in ["NA", "N/A", "null", "NaN", "#N/A"] {
            assert!(opts.na_values.iter().any(|v| v == marker), "missing {}", marker);
        }

        let cli = Cli::try_parse_from(["sql-insert-gen", "preview", "a.csv"]).unwrap();
        let Command::Preview { input, .. } = cli.command else {
            panic!("expected preview");
        };
        assert!(input.source_options().unwrap().na_values.is_empty());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let cli = Cli::try_parse_from(["sql-insert-gen", "preview", "a.csv", "--delimiter", "§"])
            .unwrap();
        let Command::Preview { input, .. } = cli.command else {
            panic!("expected preview");
        };
        assert!(input.source_options().is_err());
    }
}
