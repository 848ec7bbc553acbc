use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use log::{debug, warn};

use super::model::{Table, Value};
use super::numeric::parse_number;
use crate::error::CleanError;

/// Cell text read as missing, on top of the empty cell.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a comma-delimited UTF-8 file with a header row.
pub fn load_csv(path: &Path, name: &str) -> Result<Table> {
    ensure_exists(path)?;
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_table(reader, name, None).with_context(|| format!("reading {}", path.display()))
}

/// Load a tab-delimited Windows-1252 file, keeping only `fields`.
///
/// Every whitelisted field must be present; the kept columns follow the
/// file's own order.
pub fn load_tsv_1252(path: &Path, name: &str, fields: &[&str]) -> Result<Table> {
    ensure_exists(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        warn!("{}: undecodable bytes replaced", path.display());
    }
    let reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(text.as_bytes());
    read_table(reader, name, Some(fields)).with_context(|| format!("reading {}", path.display()))
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(CleanError::MissingFile(path.to_path_buf()).into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn read_table<R: Read>(
    mut reader: csv::Reader<R>,
    name: &str,
    fields: Option<&[&str]>,
) -> Result<Table> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let keep: Vec<usize> = match fields {
        Some(fields) => {
            if let Some(missing) = fields.iter().find(|f| !headers.iter().any(|h| h == *f)) {
                return Err(CleanError::MissingColumn {
                    dataset: name.to_string(),
                    column: missing.to_string(),
                }
                .into());
            }
            (0..headers.len())
                .filter(|&i| fields.contains(&headers[i].as_str()))
                .collect()
        }
        None => (0..headers.len()).collect(),
    };

    // Column-major while reading so each column's type can be inferred
    // over all of its cells.
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); keep.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;
        for (slot, &col) in raw.iter_mut().zip(&keep) {
            let cell = record.get(col).unwrap_or("");
            slot.push(if is_missing(cell) { None } else { Some(cell.to_string()) });
        }
    }

    let columns: Vec<String> = keep.iter().map(|&i| headers[i].clone()).collect();
    let n_rows = raw.first().map_or(0, Vec::len);
    let mut rows: Vec<Vec<Value>> = vec![Vec::with_capacity(keep.len()); n_rows];

    for (col_name, cells) in columns.iter().zip(raw) {
        let kind = infer_kind(&cells);
        debug!("{name}.{col_name}: {kind:?}");
        for (row, cell) in rows.iter_mut().zip(cells) {
            row.push(typed_cell(cell, kind));
        }
    }

    let mut table = Table::new(name, columns);
    table.rows = rows;
    Ok(table)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Integer,
    Float,
    Text,
}

/// Integer when every present cell is an integer, float when every present
/// cell is a number, text otherwise.
fn infer_kind(cells: &[Option<String>]) -> Kind {
    let mut kind = Kind::Integer;
    for cell in cells.iter().flatten() {
        match parse_number(cell) {
            Some(Value::Integer(_)) => {}
            Some(_) => kind = Kind::Float,
            None => return Kind::Text,
        }
    }
    if kind == Kind::Integer && cells.iter().any(Option::is_none) {
        Kind::Float
    } else {
        kind
    }
}

fn typed_cell(cell: Option<String>, kind: Kind) -> Value {
    let Some(text) = cell else {
        return Value::Null;
    };
    match (kind, parse_number(&text)) {
        (Kind::Text, _) | (_, None) => Value::Text(text),
        (Kind::Integer, Some(v)) => v,
        (Kind::Float, Some(v)) => Value::Float(v.as_f64().unwrap_or(f64::NAN)),
    }
}
