use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, OutcomeClass};
use crate::config::ColumnNames;
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the configured columns are read, others ignored
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500.0, ... }, ...]`
/// * `.parquet` – one column per field, string or numeric
pub fn load_dataset(path: &Path, columns: &ColumnNames) -> Result<LaunchDataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path, columns)?,
        "json" => load_json(path, columns)?,
        "parquet" | "pq" => load_parquet(path, columns)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    log::debug!("parsed {} rows from {}", records.len(), path.display());
    LaunchDataset::from_records(records, columns.clone())
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Raw cells → LaunchRecord
// ---------------------------------------------------------------------------

/// A cell as found in the source file, before validation.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Null,
}

/// The four cells a record is built from.
struct RawRow {
    site: Cell,
    payload: Cell,
    booster: Cell,
    class: Cell,
}

impl RawRow {
    fn into_record(self, row: usize, columns: &ColumnNames) -> Result<LaunchRecord, DatasetError> {
        let launch_site = text_field(self.site, row, &columns.site)?;
        let booster_version = text_field(self.booster, row, &columns.booster)?;

        let payload_mass_kg = number_field(self.payload, row, &columns.payload)?;
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(DatasetError::invalid(
                row,
                &columns.payload,
                format!("payload must be a non-negative number, got {payload_mass_kg}"),
            ));
        }

        let class = number_field(self.class, row, &columns.class)?;
        let outcome_class = OutcomeClass::from_f64(class).ok_or_else(|| {
            DatasetError::invalid(row, &columns.class, format!("expected 0 or 1, got {class}"))
        })?;

        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            booster_version,
            outcome_class,
        })
    }
}

fn text_field(cell: Cell, row: usize, column: &str) -> Result<String, DatasetError> {
    match cell {
        Cell::Text(s) if !s.is_empty() => Ok(s),
        Cell::Number(n) => Ok(n.to_string()),
        _ => Err(DatasetError::invalid(row, column, "missing value")),
    }
}

fn number_field(cell: Cell, row: usize, column: &str) -> Result<f64, DatasetError> {
    match cell {
        Cell::Number(n) => Ok(n),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DatasetError::invalid(row, column, format!("'{s}' is not a number"))),
        Cell::Null => Err(DatasetError::invalid(row, column, "missing value")),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// Columns other than the four configured ones (flight number, booster
/// category, the pandas index, ...) are ignored.
fn load_csv(path: &Path, columns: &ColumnNames) -> Result<Vec<LaunchRecord>, DatasetError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::malformed("CSV", e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let locate = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let site_idx = locate(&columns.site)?;
    let payload_idx = locate(&columns.payload)?;
    let booster_idx = locate(&columns.booster)?;
    let class_idx = locate(&columns.class)?;

    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DatasetError::malformed("CSV", e))?;
        // Report the file line; the header occupies line 1.
        let line = record
            .position()
            .map_or(index + 2, |pos| pos.line() as usize);
        let cell = |idx: usize| match record.get(idx) {
            Some(s) if !s.is_empty() => Cell::Text(s.to_string()),
            _ => Cell::Null,
        };

        let raw = RawRow {
            site: cell(site_idx),
            payload: cell(payload_idx),
            booster: cell(booster_idx),
            class: cell(class_idx),
        };
        records.push(raw.into_record(line, columns)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version": "F9 v1.0  B0005",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path, columns: &ColumnNames) -> Result<Vec<LaunchRecord>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| DatasetError::malformed("JSON", e))?;

    let rows = root
        .as_array()
        .ok_or_else(|| DatasetError::malformed("JSON", "expected top-level array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in (1..).zip(rows) {
        let obj = value
            .as_object()
            .ok_or_else(|| DatasetError::malformed("JSON", format!("row {row} is not an object")))?;

        let field = |name: &str| {
            obj.get(name)
                .map(json_to_cell)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let raw = RawRow {
            site: field(&columns.site)?,
            payload: field(&columns.payload)?,
            booster: field(&columns.booster)?,
            class: field(&columns.class)?,
        };
        records.push(raw.into_record(row, columns)?);
    }

    Ok(records)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
        JsonValue::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): strings may be Utf8 or LargeUtf8,
/// numbers any of Int32/Int64/Float32/Float64.
fn load_parquet(path: &Path, columns: &ColumnNames) -> Result<Vec<LaunchRecord>, DatasetError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)
        .map_err(|e| DatasetError::malformed("Parquet", e))?;
    let reader = builder
        .build()
        .map_err(|e| DatasetError::malformed("Parquet", e))?;

    let mut records = Vec::new();
    let mut row = 1usize;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DatasetError::malformed("Parquet", e))?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx).clone())
                .map_err(|_| DatasetError::MissingColumn(name.to_string()))
        };
        let site_col = column(&columns.site)?;
        let payload_col = column(&columns.payload)?;
        let booster_col = column(&columns.booster)?;
        let class_col = column(&columns.class)?;

        for i in 0..batch.num_rows() {
            let raw = RawRow {
                site: arrow_cell(&site_col, i, row, &columns.site)?,
                payload: arrow_cell(&payload_col, i, row, &columns.payload)?,
                booster: arrow_cell(&booster_col, i, row, &columns.booster)?,
                class: arrow_cell(&class_col, i, row, &columns.class)?,
            };
            records.push(raw.into_record(row, columns)?);
            row += 1;
        }
    }

    Ok(records)
}

/// Extract a single cell from an Arrow column at batch offset `i`.
fn arrow_cell(col: &ArrayRef, i: usize, row: usize, name: &str) -> Result<Cell, DatasetError> {
    if col.is_null(i) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(i).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(i).to_string()),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(i) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(i) as f64),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(i) as f64),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(i)),
        DataType::Boolean => Cell::Number(if col.as_boolean().value(i) { 1.0 } else { 0.0 }),
        other => {
            return Err(DatasetError::invalid(
                row,
                name,
                format!("unsupported column type {other:?}"),
            ))
        }
    };
    Ok(cell)
}
