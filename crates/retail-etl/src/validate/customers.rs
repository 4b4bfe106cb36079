//! Customers transform and validation

use crate::frame::{Frame, Value};
use retail_common::{EtlError, Result};
use tracing::warn;

/// Mandatory customer fields
const REQUIRED_COLUMNS: [&str; 3] = ["customer_fname", "customer_lname", "customer_email"];

/// Lower-case customer_email in place, then fail if any mandatory field
/// (fname, lname, email) is null or empty.
pub fn transform(frame: &mut Frame) -> Result<()> {
    let email_idx = frame.column_index("customer_email")?;

    for row in frame.rows_mut() {
        if let Value::Text(email) = &mut row[email_idx] {
            *email = email.to_lowercase();
        }
    }

    for column in REQUIRED_COLUMNS {
        let idx = frame.column_index(column)?;
        for (row_idx, row) in frame.rows().iter().enumerate() {
            let missing = match &row[idx] {
                Value::Null => true,
                Value::Text(s) => s.is_empty(),
                _ => false,
            };
            if missing {
                warn!(entity = %frame.name(), column, row = row_idx, "missing mandatory field");
                return Err(EtlError::missing_field_at(frame.name(), column, row_idx));
            }
        }
    }

    Ok(())
}
