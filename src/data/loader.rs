use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CorrelationDataset, EdgeRecord, REQUIRED_COLUMNS};

/// The input table does not match the expected correlation schema.
/// Raised before any filtering runs; fatal for that dataset.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{column}' (expected: variable1, variable2, category1, category2, correlation_estimate, p_value)")]
    MissingColumn { column: String },
    #[error("column '{column}' has type {found}, expected {expected}")]
    BadColumnType {
        column: String,
        found: String,
        expected: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a correlation table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the six required columns
/// * `.json`    – records-oriented array, `df.to_json(orient='records')`
/// * `.parquet` – flat columns, as written by Pandas/Polars
pub fn load_file(path: &Path) -> Result<CorrelationDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv_reader(std::fs::File::open(path).context("opening CSV")?),
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json_str(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a CSV correlation table from any reader.
///
/// The header row must contain every required column; extra columns are
/// ignored. Validation happens before a single row is parsed.
pub fn load_csv_reader<R: std::io::Read>(rdr: R) -> Result<CorrelationDataset> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(SchemaError::MissingColumn {
                column: required.to_string(),
            }
            .into());
        }
    }

    let mut edges = Vec::new();
    for (row_no, result) in reader.deserialize::<EdgeRecord>().enumerate() {
        // Report the file line: the header is line 1, the first record line 2.
        let record = result.with_context(|| format!("CSV line {}", row_no + 2))?;
        edges.push(record);
    }

    Ok(CorrelationDataset::from_edges(edges))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "variable1": "gdp_per_capita",
///     "variable2": "life_expectancy",
///     "category1": "economy",
///     "category2": "health",
///     "correlation_estimate": 0.72,
///     "p_value": 0.0004
///   },
///   ...
/// ]
/// ```
pub fn load_json_str(text: &str) -> Result<CorrelationDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    // Validate the schema on the first record before parsing anything.
    if let Some(first) = records.first() {
        let obj = first.as_object().context("Row 0 is not a JSON object")?;
        for required in REQUIRED_COLUMNS {
            if !obj.contains_key(required) {
                return Err(SchemaError::MissingColumn {
                    column: required.to_string(),
                }
                .into());
            }
        }
    }

    let mut edges = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let record: EdgeRecord = serde_json::from_value(rec.clone())
            .with_context(|| format!("Row {i}: invalid correlation record"))?;
        edges.push(record);
    }

    Ok(CorrelationDataset::from_edges(edges))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet correlation table.
///
/// Expected schema: the four variable/category columns as Utf8, the
/// estimate and p-value as Float64 (Float32 accepted). Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<CorrelationDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    for required in REQUIRED_COLUMNS {
        if builder.schema().index_of(required).is_err() {
            return Err(SchemaError::MissingColumn {
                column: required.to_string(),
            }
            .into());
        }
    }

    let reader = builder.build().context("building parquet reader")?;
    let mut edges = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let col = |name: &'static str| {
            batch
                .column_by_name(name)
                .with_context(|| format!("column '{name}' missing from record batch"))
        };

        let variable1 = col("variable1")?;
        let variable2 = col("variable2")?;
        let category1 = col("category1")?;
        let category2 = col("category2")?;
        let estimate = col("correlation_estimate")?;
        let p_value = col("p_value")?;

        for row in 0..batch.num_rows() {
            edges.push(EdgeRecord {
                variable1: extract_string(variable1, row, "variable1")?,
                variable2: extract_string(variable2, row, "variable2")?,
                category1: extract_string(category1, row, "category1")?,
                category2: extract_string(category2, row, "category2")?,
                correlation_estimate: extract_f64(estimate, row, "correlation_estimate")?,
                p_value: extract_f64(p_value, row, "p_value")?,
            });
        }
    }

    Ok(CorrelationDataset::from_edges(edges))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<String> {
    if col.is_null(row) {
        bail!("Row {row}: null value in column '{name}'");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(SchemaError::BadColumnType {
            column: name.to_string(),
            found: format!("{other:?}"),
            expected: "Utf8",
        }
        .into()),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<f64> {
    if col.is_null(row) {
        bail!("Row {row}: null value in column '{name}'");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        Err(SchemaError::BadColumnType {
            column: name.to_string(),
            found: format!("{:?}", col.data_type()),
            expected: "Float64",
        }
        .into())
    }
}
