//! Tabular structure shared by every pipeline stage
//!
//! A [`Frame`] is one entity's worth of data: an ordered set of typed columns
//! and an ordered sequence of rows of scalar [`Value`]s. Frames are created
//! once per run by the reader, mutated in place by their transform step, and
//! consumed exactly once by the loader.

use chrono::NaiveDateTime;
use retail_common::{EtlError, Result};

/// Scalar type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Text,
    /// Produced by the orders transform; never read directly from a source
    Timestamp,
}

/// One scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// True if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric content widened to f64 (integers included)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Canonical key form used for cross-entity membership checks.
    ///
    /// Null has no key form: a null foreign-key value never matches anything,
    /// and a null parent key is never a valid membership target.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An entity's tabular data: fixed column schema, ordered rows
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Create an empty frame with the given entity name and column schema
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Entity name (also the destination table name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column schema, in file order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the frame holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in source order
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Mutable access for in-place transforms
    pub fn rows_mut(&mut self) -> &mut [Vec<Value>] {
        &mut self.rows
    }

    /// Append a row; its arity must match the column schema
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(EtlError::config(format!(
                "row arity {} does not match {} columns of '{}'",
                row.len(),
                self.columns.len(),
                self.name
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Index of a named column
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| {
                EtlError::config(format!("entity '{}' has no column '{}'", self.name, column))
            })
    }

    /// Iterate one column's values across all rows
    pub fn column_values(&self, column: &str) -> Result<impl Iterator<Item = &Value>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Change a column's declared type after an in-place transform
    pub fn retype_column(&mut self, column: &str, ty: ColumnType) -> Result<()> {
        let idx = self.column_index(column)?;
        self.columns[idx].ty = ty;
        Ok(())
    }
}
