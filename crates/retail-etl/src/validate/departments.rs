//! Departments validation

use crate::frame::Frame;
use retail_common::{EtlError, Result};
use std::collections::HashSet;
use tracing::warn;

/// Fail if any department_name repeats.
///
/// Department names must be unique across the whole extract; the first
/// repeated name aborts the run.
pub fn validate(frame: &Frame) -> Result<()> {
    let mut seen = HashSet::new();

    for value in frame.column_values("department_name")? {
        let name = value.to_string();
        if !seen.insert(name.clone()) {
            warn!(entity = %frame.name(), department_name = %name, "duplicate department");
            return Err(EtlError::duplicate_key(
                frame.name(),
                "department_name",
                name,
            ));
        }
    }

    Ok(())
}
