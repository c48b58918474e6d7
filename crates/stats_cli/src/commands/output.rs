//! Rendering of numeric result rows as table, JSON or CSV.

use std::io::Write;

use serde_json::{Map, Value};

use crate::config::OutputFormat;
use crate::Result;

/// Writes `rows` under `headers` in the requested format.
///
/// Every row must have one value per header.
pub fn write_rows<W: Write>(
    out: &mut W,
    format: OutputFormat,
    precision: usize,
    headers: &[&str],
    rows: &[Vec<f64>],
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, precision, headers, rows),
        OutputFormat::Csv => write_csv(out, precision, headers, rows),
        OutputFormat::Json => write_json(out, headers, rows),
    }
}

fn format_cell(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

fn write_table<W: Write>(
    out: &mut W,
    precision: usize,
    headers: &[&str],
    rows: &[Vec<f64>],
) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|&v| format_cell(v, precision)).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| -> String {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!(" {:<w$} ", h, w = w))
        .collect();
    writeln!(out, "│{}│", header_line.join("│"))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!(" {:>w$} ", c, w = w))
            .collect();
        writeln!(out, "│{}│", line.join("│"))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}

fn write_csv<W: Write>(
    out: &mut W,
    precision: usize,
    headers: &[&str],
    rows: &[Vec<f64>],
) -> Result<()> {
    writeln!(out, "{}", headers.join(","))?;
    for row in rows {
        let line: Vec<String> = row.iter().map(|&v| format_cell(v, precision)).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<f64>]) -> Result<()> {
    let records: Vec<Value> = rows
        .iter()
        .map(|row| {
            let record: Map<String, Value> = headers
                .iter()
                .zip(row)
                .map(|(h, &v)| (h.to_string(), Value::from(v)))
                .collect();
            Value::Object(record)
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}
