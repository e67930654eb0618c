mod config;
mod source;
mod sql;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Command, InputArgs, SqlArgs};
use serde::Serialize;
use sql::Session;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use types::Dataset;

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Sheets { file } => {
            let names = source::list_sheets(&file)?;
            let mut out = io::stdout().lock();
            for name in names {
                writeln!(out, "{}", name)?;
            }
            Ok(())
        }
        Command::Preview { input, rows, json } => {
            let session = load_session(&input)?;
            print_preview(&session, rows, json)
        }
        Command::Generate { input, sql, output } => {
            let session = load_session(&input)?;
            generate(session, &sql, output)
        }
    }
}

fn load_session(input: &InputArgs) -> Result<Session> {
    let options = input.source_options()?;
    let loaded = source::load(&input.file, &options)?;
    let mut session = Session::new();
    session.load(loaded);
    Ok(session)
}

fn generate(mut session: Session, args: &SqlArgs, output: Option<PathBuf>) -> Result<()> {
    let options = args.generate_options()?;
    let dialect = args.dialect()?.dialect();

    if session.source().map_or(true, |s| s.dataset.is_empty()) {
        warn!("Input has no data rows; nothing to generate");
        return Ok(());
    }

    info!("Target dialect: {}", dialect.name());
    let sql = session.generate(&options, dialect)?.sql.clone();

    match output {
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", sql)?;
        }
        Some(path) => {
            let path = if path.is_dir() {
                let name = session
                    .output_file_name()
                    .context("No generated output to name")?;
                path.join(name)
            } else {
                path
            };
            write_output(&path, &sql)?;
        }
    }
    Ok(())
}

fn write_output(path: &Path, sql: &str) -> Result<()> {
    fs::write(path, sql).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} bytes to {}", sql.len(), path.display());
    Ok(())
}

#[derive(Serialize)]
struct PreviewReport<'a> {
    source: &'a str,
    sheet: Option<&'a str>,
    columns: &'a [String],
    total_rows: usize,
    rows: Vec<Vec<Option<String>>>,
}

fn print_preview(session: &Session, rows: usize, json: bool) -> Result<()> {
    let preview = session.preview(rows)?;
    let source = session.source().context("No data loaded")?;
    let mut out = io::stdout().lock();

    if json {
        let report = PreviewReport {
            source: &source.source_name,
            sheet: source.sheet.as_deref(),
            columns: &preview.columns,
            total_rows: source.dataset.row_count(),
            rows: preview_cells(&preview),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", render_table(&preview))?;
        writeln!(
            out,
            "({} of {} rows shown)",
            preview.row_count(),
            source.dataset.row_count()
        )?;
    }
    Ok(())
}

/// Cells as display strings, with blanks as `None`
fn preview_cells(dataset: &Dataset) -> Vec<Vec<Option<String>>> {
    dataset
        .rows
        .iter()
        .map(|row| {
            row.values
                .iter()
                .map(|v| (!v.is_blank()).then(|| v.to_string()))
                .collect()
        })
        .collect()
}

/// Plain-text table with padded columns
fn render_table(dataset: &Dataset) -> String {
    let cells: Vec<Vec<String>> = preview_cells(dataset)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|c| c.unwrap_or_else(|| "NULL".to_string()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = dataset.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut table = line(&dataset.columns);
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.push_str(&format!("{}\n", sep.join("-+-")));
    for row in &cells {
        table.push_str(&line(row));
    }
    table
}
