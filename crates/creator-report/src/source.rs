//! Loading the reporting extract (CSV or JSON) into one record snapshot

use anyhow::{Context, Result};
use report_pipeline::Record;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported input format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("expected a JSON array of records (or an object with a \"data\" array)")]
    NotAnArray,

    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Load every record of an extract. The format is picked by file extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let records = match extension.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_csv(file).with_context(|| format!("Failed to read CSV {}", path.display()))?
        }
        "json" => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_json(&content).with_context(|| format!("Failed to parse JSON {}", path.display()))?
        }
        other => return Err(SourceError::UnsupportedFormat(other.to_string()).into()),
    };

    info!(path = %path.display(), records = records.len(), "Loaded records");
    Ok(records)
}

/// Read CSV rows keyed by the header row. Cells stay strings; short rows
/// simply lack the trailing fields.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }

    debug!(columns = headers.len(), rows = records.len(), "Read CSV");
    Ok(records)
}

/// Parse a JSON array of objects, or an object wrapping one under "data"
pub fn parse_json(content: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(SourceError::NotAnArray.into()),
        },
        _ => return Err(SourceError::NotAnArray.into()),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| -> Result<Record> {
            match item {
                Value::Object(map) => Ok(map),
                _ => Err(SourceError::NotAnObject { index }.into()),
            }
        })
        .collect()
}
