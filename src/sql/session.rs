//! Session state: the loaded dataset and the last generated text

use anyhow::{anyhow, Result};
use tracing::info;

use super::dialect::SqlDialect;
use super::formatter::generate_with;
use super::options::GenerateOptions;
use crate::source::LoadedSource;
use crate::types::Dataset;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Output of the most recent generation request
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub table_name: String,
    pub sql: String,
}

#[derive(Default)]
pub struct Session {
    source: Option<LoadedSource>,
    generated: Option<Generated>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded dataset. Any previously generated text is dropped.
    pub fn load(&mut self, source: LoadedSource) {
        info!(
            "Loaded {} ({} columns, {} rows)",
            source.source_name,
            source.dataset.columns.len(),
            source.dataset.row_count()
        );
        self.source = Some(source);
        self.generated = None;
    }

    pub fn clear(&mut self) {
        self.source = None;
        self.generated = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&LoadedSource> {
        self.source.as_ref()
    }

    pub fn preview(&self, rows: usize) -> Result<Dataset> {
        let source = self.loaded()?;
        Ok(source.dataset.head(rows))
    }

    /// Run the formatter over the loaded dataset and remember the result.
    pub fn generate(
        &mut self,
        options: &GenerateOptions,
        dialect: &dyn SqlDialect,
    ) -> Result<&Generated> {
        self.generated = None;
        let source = self.loaded()?;
        let table_name = options.resolve_table_name(&source.default_table_name)?;
        let sql = generate_with(
            &source.dataset,
            &table_name,
            options.blank_policy,
            options.grouping,
            dialect,
        )?;

        info!(
            "Generated {} bytes of SQL for table '{}'",
            sql.len(),
            table_name
        );
        Ok(self.generated.insert(Generated { table_name, sql }))
    }

    pub fn generated(&self) -> Option<&Generated> {
        self.generated.as_ref()
    }

    /// File name for saving the generated text: `{table}.sql`, with path
    /// separators replaced so the name stays a single path component.
    pub fn output_file_name(&self) -> Option<String> {
        self.generated
            .as_ref()
            .map(|g| format!("{}.sql", g.table_name.replace(['/', '\\'], "_")))
    }

    fn loaded(&self) -> Result<&LoadedSource> {
        self.source
            .as_ref()
            .ok_or_else(|| anyhow!("No data loaded"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::MsSqlDialect;
    use crate::sql::{BlankPolicy, GroupingMode};
    use crate::types::{CellValue, Row};

    fn source(name: &str, rows: usize) -> LoadedSource {
        let rows = (0..rows as i64)
            .map(|i| Row::new(vec![CellValue::Integer(i), CellValue::Absent]))
            .collect();
        LoadedSource {
            dataset: Dataset::new(vec!["id".into(), "note".into()], rows).unwrap(),
            source_name: format!("{}.csv", name),
            default_table_name: name.to_string(),
            sheet: None,
        }
    }

    #[test]
    fn test_empty_session() {
        let mut session = Session::new();
        assert!(!session.is_loaded());
        assert!(session.preview(5).is_err());
        assert!(session
            .generate(&GenerateOptions::default(), &MsSqlDialect)
            .is_err());
        assert!(session.output_file_name().is_none());
    }

    #[test]
    fn test_generate_uses_default_table_name() {
        let mut session = Session::new();
        session.load(source("people", 1));
        let generated = session
            .generate(&GenerateOptions::default(), &MsSqlDialect)
            .unwrap();
        assert_eq!(generated.table_name, "people");
        assert_eq!(
            generated.sql,
            "INSERT INTO [people] ([id], [note]) VALUES ('0', NULL);"
        );
        assert_eq!(session.output_file_name().unwrap(), "people.sql");
    }

    #[test]
    fn test_generate_with_user_table_name() {
        let mut session = Session::new();
        session.load(source("people", 2));
        let opts = GenerateOptions {
            table_name: Some(" staff ".into()),
            blank_policy: BlankPolicy::AsEmptyString,
            grouping: GroupingMode::MultiRowSingleStatement,
        };
        let generated = session.generate(&opts, &MsSqlDialect).unwrap();
        assert_eq!(
            generated.sql,
            "INSERT INTO [staff] ([id], [note])\nVALUES\n('0', ''),\n('1', '');"
        );
        assert_eq!(session.output_file_name().unwrap(), "staff.sql");
    }

    #[test]
    fn test_load_clears_generated() {
        let mut session = Session::new();
        session.load(source("a", 1));
        session
            .generate(&GenerateOptions::default(), &MsSqlDialect)
            .unwrap();
        assert!(session.generated().is_some());

        session.load(source("b", 3));
        assert!(session.generated().is_none());
        assert_eq!(session.source().unwrap().default_table_name, "b");
        assert_eq!(session.preview(DEFAULT_PREVIEW_ROWS).unwrap().row_count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.load(source("a", 1));
        session
            .generate(&GenerateOptions::default(), &MsSqlDialect)
            .unwrap();
        session.clear();
        assert!(!session.is_loaded());
        assert!(session.generated().is_none());
    }

    #[test]
    fn test_generate_fails_without_table_name() {
        let mut session = Session::new();
        session.load(source("", 1));
        let named = GenerateOptions {
            table_name: Some("t".into()),
            ..GenerateOptions::default()
        };
        session.generate(&named, &MsSqlDialect).unwrap();
        assert!(session.generated().is_some());

        let err = session.generate(&GenerateOptions::default(), &MsSqlDialect);
        assert!(err.is_err());
        assert!(session.generated().is_none());
        assert!(session.output_file_name().is_none());
    }

    #[test]
    fn test_output_file_name_is_single_component() {
        let mut session = Session::new();
        session.load(source("people", 1));
        for (table, expected) in [
            ("dbo/x", "dbo_x.sql"),
            ("../x", ".._x.sql"),
            ("a\\b", "a_b.sql"),
            ("dbo.x", "dbo.x.sql"),
        ] {
            let opts = GenerateOptions {
                table_name: Some(table.into()),
                ..GenerateOptions::default()
            };
            session.generate(&opts, &MsSqlDialect).unwrap();
            assert_eq!(session.output_file_name().unwrap(), expected);
        }
    }
}
