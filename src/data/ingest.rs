//! CSV ingestion: raw file content to an ordered list of series sharing one x column.
//!
//! The first column is the x-domain; every other column becomes a [`Series`]
//! named after its header. Cell coercion is permissive: a cell that is not a
//! number is passed through as text and never fails the ingest.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::data::series::{CellValue, Series};
use crate::error::IngestError;

/// Result of a successful ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub x_column_name: String,
    pub series: Vec<Series>,
}

/// Parse CSV text with a header row.
pub fn ingest(raw_text: &str) -> Result<Ingested, IngestError> {
    if raw_text.trim().is_empty() {
        return Err(IngestError::empty());
    }
    ingest_reader(raw_text.as_bytes())
}

/// Parse CSV from any reader with a header row.
pub fn ingest_reader(rdr: impl Read) -> Result<Ingested, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        // Exports often end with ragged rows or a trailing blank line
        .flexible(true)
        .from_reader(rdr);

    let headers = rdr
        .headers()
        .map_err(|e| IngestError::unreadable(e.to_string()))?
        .clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(IngestError::empty());
    }

    let x_column_name = headers.get(0).unwrap_or_default().to_string();
    let names = unique_names(headers.iter().skip(1));

    let mut x: Vec<CellValue> = Vec::new();
    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];

    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| {
            tracing::warn!(line = line + 2, error = %e, "unreadable CSV record");
            IngestError::unreadable(e.to_string())
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        x.push(CellValue::parse(record.get(0).unwrap_or_default()));
        for (col, values) in columns.iter_mut().enumerate() {
            values.push(CellValue::parse(record.get(col + 1).unwrap_or_default()));
        }
    }

    let series = names
        .into_iter()
        .zip(columns)
        .map(|(name, y)| Series::new(name, x.clone(), y))
        .collect();

    Ok(Ingested {
        x_column_name,
        series,
    })
}

/// Disambiguate duplicate headers by suffixing ` (2)`, ` (3)`, ... in column order.
///
/// A generated name never collides with a header seen earlier or later.
fn unique_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for h in headers {
        let count = counts.entry(h).or_insert(0);
        *count += 1;
        let mut name = h.to_string();
        let mut n = (*count).max(2);
        while taken.contains(&name) {
            name = format!("{} ({})", h, n);
            n += 1;
        }
        taken.insert(name.clone());
        out.push(name);
    }
    out
}
