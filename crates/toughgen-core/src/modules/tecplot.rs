//! Tecplot-style result tables (`*.tec`) flattened into CSV, one row per data
//! line with the zone time prepended.

use super::serialization::write_text_artifact;
use crate::domain::DeckResult;
use crate::parser::read_source_text;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularTable {
    /// `Time` followed by the declared variable names; empty when the file
    /// never declares its variables.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn parse_tecplot(text: &str) -> TabularTable {
    let mut table = TabularTable::default();
    let mut current_time = 0.0_f64;

    for raw in text.lines() {
        let line = raw.trim();
        let Some(first) = line.chars().next() else {
            continue;
        };
        let lowered = line.to_ascii_lowercase();

        if lowered.starts_with("variables") {
            let names = quoted_names(line);
            if !names.is_empty() {
                table.headers = std::iter::once("Time".to_string()).chain(names).collect();
            }
            continue;
        }

        if lowered.starts_with("zone") {
            if let Some(raw_time) = zone_time(line) {
                current_time = raw_time.parse::<f64>().unwrap_or(0.0);
            }
            continue;
        }

        if first.is_ascii_digit() || first == '-' || first == '+' {
            let mut row = Vec::with_capacity(table.headers.len().max(1));
            row.push(format_time(current_time));
            row.extend(line.split_whitespace().map(str::to_string));
            table.rows.push(row);
        }
    }

    table
}

/// Shortest round-trip form; exponents are signed and at least two digits
/// (`4.0`, `1e+16`, `2.5e-05`).
fn format_time(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Text between each pair of double quotes; an unpaired trailing quote is ignored.
fn quoted_names(line: &str) -> Vec<String> {
    let segments: Vec<&str> = line.split('"').collect();
    segments
        .iter()
        .enumerate()
        .filter(|(index, _)| index % 2 == 1 && index + 1 < segments.len())
        .map(|(_, name)| name.to_string())
        .collect()
}

/// `Zone T = "<time> sec"`; `None` when the line carries no time title.
fn zone_time(line: &str) -> Option<&str> {
    let rest = line.get(4..)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('T').or_else(|| rest.strip_prefix('t'))?;
    let rest = rest.trim_start().strip_prefix('=')?;
    let quoted = rest.trim_start().strip_prefix('"')?;
    let title = &quoted[..quoted.find('"')?];

    let split = title.len().checked_sub(3)?;
    let (value, unit) = (title.get(..split)?, title.get(split..)?);
    if !unit.eq_ignore_ascii_case("sec") {
        return None;
    }
    Some(value.trim())
}

pub fn render_csv(table: &TabularTable) -> String {
    let mut csv = String::new();
    let records = (!table.headers.is_empty())
        .then_some(&table.headers)
        .into_iter()
        .chain(table.rows.iter());
    for record in records {
        let fields: Vec<String> = record.iter().map(|field| csv_field(field)).collect();
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `co2d_conc.tec` becomes `co2d_conc_paraview.csv` next to it.
pub fn default_csv_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_paraview.csv"))
}

pub fn convert_tecplot_file(input: &Path, output: &Path) -> DeckResult<TabularTable> {
    let text = read_source_text(input, "tecplot output")?;
    let table = parse_tecplot(&text);
    write_text_artifact(output, &render_csv(&table))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        rows = table.rows.len(),
        "converted tecplot table"
    );
    Ok(table)
}
