//! Output formatting: table, JSON, YAML, plain, and CSV files.
//!
//! Table and CSV both go through the per-model `Column` set, so a dump
//! always matches what `--list_clients` shows.

use std::io::{self, Write};
use std::path::Path;

use tabled::{builder::Builder, settings::Style};

use bwan_core::columns::{Column, headers, row};
use bwan_core::Edge;

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatcher ────────────────────────────────────────────────

/// Render `edges` in the chosen format.
///
/// - `table`: grid table with one row per edge
/// - `json` / `json-compact` / `yaml`: the edge records via serde
/// - `plain`: one edge ID per line
pub fn render_edges(
    format: OutputFormat,
    edges: &[Edge],
    columns: &[Column],
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table => render_table(edges, columns),
        OutputFormat::Json => serde_json::to_string_pretty(edges)?,
        OutputFormat::JsonCompact => serde_json::to_string(edges)?,
        OutputFormat::Yaml => serde_yaml::to_string(edges)?,
        OutputFormat::Plain => edges
            .iter()
            .map(|e| e.id.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) -> Result<(), CliError> {
    write_output(&mut io::stdout().lock(), output)?;
    Ok(())
}

fn write_output(out: &mut impl Write, output: &str) -> io::Result<()> {
    if output.is_empty() {
        return Ok(());
    }
    writeln!(out, "{output}")?;
    out.flush()
}

fn render_table(edges: &[Edge], columns: &[Column]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers(columns));
    for edge in edges {
        builder.push_record(row(columns, edge));
    }
    builder.build().with(Style::ascii()).to_string()
}

// ── CSV ──────────────────────────────────────────────────────────────

/// Write a header row and one row per edge to `path`, replacing any
/// existing file.
pub fn write_csv(path: &Path, columns: &[Column], edges: &[Edge]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers(columns))?;
    for edge in edges {
        writer.write_record(row(columns, edge))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use bwan_core::columns_for;
    use serde_json::json;

    use super::*;

    fn edges() -> Vec<Edge> {
        serde_json::from_value(json!([
            {
                "id": "c-1",
                "name": "laptop",
                "model": "Client",
                "createdBy": { "name": "alice" },
                "clientConfiguration": { "assignedVirtualIPAddress": "100.64.0.1" }
            },
            { "id": "c-2", "model": "Client" }
        ]))
        .unwrap()
    }

    #[test]
    fn table_has_header_and_one_row_per_edge() {
        let out = render_edges(OutputFormat::Table, &edges(), columns_for("Client")).unwrap();
        let rows: Vec<&str> = out.lines().filter(|l| l.starts_with('|')).collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("Assigned VIP"));
        assert!(rows[1].contains("100.64.0.1"));
        assert!(rows[2].contains("c-2"));
        assert!(out.starts_with('+'));
    }

    #[test]
    fn empty_table_keeps_headers() {
        let out = render_edges(OutputFormat::Table, &[], columns_for("Edge")).unwrap();
        assert!(out.contains("Model"));
        assert_eq!(out.lines().filter(|l| l.starts_with('|')).count(), 1);
    }

    #[test]
    fn plain_prints_ids() {
        let out = render_edges(OutputFormat::Plain, &edges(), columns_for("Client")).unwrap();
        assert_eq!(out, "c-1\nc-2");
    }

    #[test]
    fn json_keeps_wire_field_names() {
        let out = render_edges(OutputFormat::JsonCompact, &edges(), columns_for("Client")).unwrap();
        assert!(out.contains("\"assignedVirtualIPAddress\":\"100.64.0.1\""));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_reported() {
        let err = write_output(&mut ClosedPipe, "c-1").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        write_output(&mut ClosedPipe, "").unwrap();

        let mut buf = Vec::new();
        write_output(&mut buf, "c-1\nc-2").unwrap();
        assert_eq!(buf, b"c-1\nc-2\n");
    }

    #[test]
    fn csv_dump_matches_table_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.csv");

        write_csv(&path, columns_for("Client"), &edges()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "ID,Name,User,Assigned VIP\nc-1,laptop,alice,100.64.0.1\nc-2,-,-,-\n"
        );
    }
}
