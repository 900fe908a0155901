// reader.rs - CSV rows into InputRecords
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use super::{InputRecord, REQUIRED_COLUMNS};
use crate::error::PipelineError;

/// Header positions of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub fid: usize,
    pub id: usize,
    pub address: usize,
    pub city: usize,
    pub state: usize,
    pub zip: usize,
}

/// Confirm every required column is present.
///
/// Reports the first missing column in declaration order, so the message
/// is the same no matter how many columns are absent.
pub fn validate_headers(headers: &StringRecord) -> Result<ColumnMap, PipelineError> {
    let mut positions = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or(PipelineError::MissingColumn { column })?;
    }

    let [fid, id, address, city, state, zip] = positions;
    Ok(ColumnMap {
        fid,
        id,
        address,
        city,
        state,
        zip,
    })
}

/// Read and validate every row from a CSV file on disk.
pub fn read_records_from_path(path: &Path) -> Result<Vec<InputRecord>, PipelineError> {
    let reader = ReaderBuilder::new()
        .from_path(path)
        .map_err(|source| PipelineError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
    collect_records(reader, path)
}

/// Read and validate every row from any CSV source.
pub fn read_records<R: Read>(source: R) -> Result<Vec<InputRecord>, PipelineError> {
    let reader = ReaderBuilder::new().from_reader(source);
    collect_records(reader, Path::new("<reader>"))
}

fn collect_records<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<InputRecord>, PipelineError> {
    let headers = reader
        .headers()
        .map_err(|source| PipelineError::InputRead {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = validate_headers(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|e| PipelineError::MalformedRow {
            row: row_number,
            reason: e.to_string(),
        })?;
        records.push(parse_row(&row, &columns, row_number)?);
    }

    settle_identifier_column(&mut records, fid_cell);
    settle_identifier_column(&mut records, id_cell);
    Ok(records)
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnMap,
    row_number: usize,
) -> Result<InputRecord, PipelineError> {
    Ok(InputRecord {
        fid: Value::from(required_cell(row, columns.fid, "FID", row_number)?),
        id: Value::from(required_cell(row, columns.id, "ID", row_number)?),
        address: required_cell(row, columns.address, "address", row_number)?.to_string(),
        city: required_cell(row, columns.city, "city", row_number)?.to_string(),
        state: required_cell(row, columns.state, "state", row_number)?.to_string(),
        zip: required_cell(row, columns.zip, "zip", row_number)?.to_string(),
    })
}

fn required_cell<'a>(
    row: &'a StringRecord,
    position: usize,
    column: &str,
    row_number: usize,
) -> Result<&'a str, PipelineError> {
    match row.get(position) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(PipelineError::MalformedRow {
            row: row_number,
            reason: format!("missing value for '{}'", column),
        }),
    }
}

fn fid_cell(record: &mut InputRecord) -> &mut Value {
    &mut record.fid
}

fn id_cell(record: &mut InputRecord) -> &mut Value {
    &mut record.id
}

/// Give an identifier column a single JSON type: numbers when every cell is
/// numeric, the raw strings otherwise.
fn settle_identifier_column(records: &mut [InputRecord], cell: fn(&mut InputRecord) -> &mut Value) {
    let numbers: Option<Vec<Value>> = records
        .iter_mut()
        .map(|record| cell(record).as_str().and_then(identifier_number))
        .collect();

    if let Some(numbers) = numbers {
        for (record, number) in records.iter_mut().zip(numbers) {
            *cell(record) = number;
        }
    }
}

/// A cell counts as a number only if its canonical rendering is the cell
/// itself, so `007`, `1e5` or out-of-range digits are never rewritten.
pub fn identifier_number(raw: &str) -> Option<Value> {
    let number = if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Ok(n) = raw.parse::<u64>() {
        Value::from(n)
    } else {
        let n = raw.parse::<f64>().ok().filter(|n| n.is_finite())?;
        Value::Number(serde_json::Number::from_f64(n)?)
    };

    (number.to_string() == raw).then_some(number)
}
