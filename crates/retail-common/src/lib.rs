//! Retail ETL Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the retail ETL workspace.
//!
//! # Overview
//!
//! This crate provides the functionality used across all workspace members:
//!
//! - **Error Handling**: The pipeline-wide error taxonomy and result type
//! - **Logging**: Configuration and initialization of the tracing stack
//!
//! # Example
//!
//! ```no_run
//! use retail_common::{EtlError, Result};
//!
//! fn check_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(EtlError::missing_field("departments", "department_name"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{EtlError, Result};
