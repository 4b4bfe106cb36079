//! Cross-entity membership validation
//!
//! The single named operation behind every foreign-key check in the
//! pipeline: values in a referencing column must be a subset of the key
//! values present in the referenced entity.

use crate::frame::{Frame, Value};
use retail_common::{EtlError, Result};
use std::collections::HashSet;

/// Check that every value of `child.child_column` exists in
/// `parent.parent_column`.
///
/// The parent key set is built once, then every child value is tested for
/// membership. The first non-member aborts the run; a null child value is
/// never a member of anything.
pub fn validate_membership(
    child: &Frame,
    child_column: &str,
    parent: &Frame,
    parent_column: &str,
) -> Result<()> {
    let valid_keys: HashSet<String> = parent
        .column_values(parent_column)?
        .filter_map(Value::lookup_key)
        .collect();

    for value in child.column_values(child_column)? {
        let is_member = value
            .lookup_key()
            .map(|key| valid_keys.contains(&key))
            .unwrap_or(false);

        if !is_member {
            return Err(EtlError::referential_integrity(
                child.name(),
                child_column,
                value.to_string(),
                parent.name(),
                parent_column,
            ));
        }
    }

    Ok(())
}
