//! Orders transform and validation

use super::membership::validate_membership;
use crate::frame::{ColumnType, Frame, Value};
use chrono::{NaiveDate, NaiveDateTime};
use retail_common::{EtlError, Result};
use tracing::warn;

/// Accepted order_date layouts, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse order_date into a timestamp in place, then check that every
/// order_customer_id exists in customers.customer_id.
///
/// Date parsing is best-effort across the accepted layouts; any row whose
/// date is null or fits none of them aborts the run.
pub fn transform(frame: &mut Frame, customers: &Frame) -> Result<()> {
    let date_idx = frame.column_index("order_date")?;

    for row_idx in 0..frame.rows().len() {
        let value = &frame.rows()[row_idx][date_idx];
        let parsed = match value {
            Value::Text(raw) => parse_order_date(raw),
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        };

        match parsed {
            Some(ts) => frame.rows_mut()[row_idx][date_idx] = Value::Timestamp(ts),
            None => {
                let raw = frame.rows()[row_idx][date_idx].to_string();
                warn!(entity = %frame.name(), row = row_idx, value = %raw, "invalid order_date");
                return Err(EtlError::invalid_format(
                    frame.name(),
                    "order_date",
                    row_idx,
                    raw,
                ));
            }
        }
    }
    frame.retype_column("order_date", ColumnType::Timestamp)?;

    validate_membership(frame, "order_customer_id", customers, "customer_id")
}

/// Best-effort date parsing: full timestamps first, bare dates as midnight
fn parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    for format in DATE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
