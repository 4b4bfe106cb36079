//! Tabular reader: pipe-delimited source file → typed [`Frame`]
//!
//! Sources carry no header row; the entity's schema supplies the column
//! names and types. Any unreadable file, short/long record, or field that
//! fails its column type aborts the run with a read error.

use crate::frame::{Column, ColumnType, Frame, Value};
use crate::schema::Entity;
use retail_common::{EtlError, Result};
use std::path::Path;
use tracing::info;

/// Read one entity's source file into a frame
pub fn read_source(path: &Path, entity: Entity) -> Result<Frame> {
    let columns = entity.columns();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| EtlError::read(path.display().to_string(), e))?;

    let mut frame = Frame::new(entity.table_name(), columns.clone());

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| EtlError::read(path.display().to_string(), e))?;

        if record.len() != columns.len() {
            return Err(EtlError::read(
                path.display().to_string(),
                format!(
                    "record {} has {} fields, expected {}",
                    row_idx,
                    record.len(),
                    columns.len()
                ),
            ));
        }

        let mut row = Vec::with_capacity(columns.len());
        for (column, field) in columns.iter().zip(record.iter()) {
            row.push(parse_field(field, column, path, row_idx)?);
        }
        frame.push_row(row)?;
    }

    info!(
        entity = %entity,
        rows = frame.len(),
        path = %path.display(),
        "source read"
    );

    Ok(frame)
}

fn parse_field(field: &str, column: &Column, path: &Path, row: usize) -> Result<Value> {
    if field.is_empty() {
        return Ok(Value::Null);
    }

    let malformed = |expected: &str| {
        EtlError::read(
            path.display().to_string(),
            format!(
                "record {}, column '{}': '{}' is not a valid {}",
                row, column.name, field, expected
            ),
        )
    };

    match column.ty {
        ColumnType::Int => field
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| malformed("integer")),
        ColumnType::Float => field
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| malformed("number")),
        ColumnType::Text => Ok(Value::Text(field.to_string())),
        // No entity schema reads timestamps directly; they only appear after
        // the orders transform
        ColumnType::Timestamp => Err(malformed("timestamp")),
    }
}
