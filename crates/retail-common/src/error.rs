//! Error types for the retail ETL pipeline
//!
//! Every failure in the pipeline is terminal: errors are logged by the
//! caller and propagated up to the binary, which decides the exit status.
//! Validators never exit the process themselves.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EtlError>;

/// Main error type for the retail ETL pipeline
#[derive(Error, Debug)]
pub enum EtlError {
    /// A delimited source file could not be read or parsed
    #[error("Failed to read source '{source_path}': {reason}")]
    Read { source_path: String, reason: String },

    /// A column that must be unique contains a repeated value
    #[error("Duplicate value in {entity}.{column}: '{value}'")]
    DuplicateKey {
        entity: String,
        column: String,
        value: String,
    },

    /// A mandatory field is null or empty
    #[error("Missing mandatory field {entity}.{column} at row {row}")]
    MissingField {
        entity: String,
        column: String,
        row: usize,
    },

    /// A field value does not parse as its expected type
    #[error("Invalid value in {entity}.{column} at row {row}: '{value}'")]
    InvalidFormat {
        entity: String,
        column: String,
        row: usize,
        value: String,
    },

    /// A foreign-key value has no match in the referenced entity
    #[error("{entity}.{column} value '{value}' not found in {parent}.{parent_column}")]
    ReferentialIntegrity {
        entity: String,
        column: String,
        value: String,
        parent: String,
        parent_column: String,
    },

    /// Appending rows to a destination table failed
    #[error("Failed to load table '{table}': {reason}")]
    Load { table: String, reason: String },

    /// The destination database could not be reached
    #[error("Database connection error: {0}. Check DATABASE_URL and connection settings.")]
    Connection(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtlError {
    /// Create a read error for a source file
    pub fn read(source_path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Read {
            source_path: source_path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key(
        entity: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::DuplicateKey {
            entity: entity.into(),
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(entity: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingField {
            entity: entity.into(),
            column: column.into(),
            row: 0,
        }
    }

    /// Create a missing field error pointing at a specific row
    pub fn missing_field_at(
        entity: impl Into<String>,
        column: impl Into<String>,
        row: usize,
    ) -> Self {
        Self::MissingField {
            entity: entity.into(),
            column: column.into(),
            row,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(
        entity: impl Into<String>,
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            entity: entity.into(),
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    /// Create a referential integrity error
    pub fn referential_integrity(
        entity: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
        parent: impl Into<String>,
        parent_column: impl Into<String>,
    ) -> Self {
        Self::ReferentialIntegrity {
            entity: entity.into(),
            column: column.into(),
            value: value.into(),
            parent: parent.into(),
            parent_column: parent_column.into(),
        }
    }

    /// Create a load error for a destination table
    pub fn load(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
