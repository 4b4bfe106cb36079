//! Order items transform and validation

use super::membership::validate_membership;
use crate::frame::{Frame, Value};
use retail_common::Result;
use tracing::info;

/// Check both foreign keys, then apply the bulk subtotal policy.
///
/// Subtotal policy: if ANY row's stored order_item_subtotal disagrees with
/// order_item_quantity × order_item_product_price, the subtotal column is
/// recomputed for EVERY row. A single mismatch triggers the whole-column
/// rewrite; there is no per-row correction.
pub fn transform(frame: &mut Frame, orders: &Frame, products: &Frame) -> Result<()> {
    validate_membership(frame, "order_item_order_id", orders, "order_id")?;
    validate_membership(frame, "order_item_product_id", products, "product_id")?;

    let quantity_idx = frame.column_index("order_item_quantity")?;
    let subtotal_idx = frame.column_index("order_item_subtotal")?;
    let price_idx = frame.column_index("order_item_product_price")?;

    let calculated: Vec<f64> = frame
        .rows()
        .iter()
        .map(|row| {
            match (row[quantity_idx].as_f64(), row[price_idx].as_f64()) {
                (Some(quantity), Some(price)) => quantity * price,
                // A null factor can never match a stored subtotal, which
                // forces the bulk recompute below
                _ => f64::NAN,
            }
        })
        .collect();

    let any_mismatch = frame
        .rows()
        .iter()
        .zip(&calculated)
        // NaN on either side compares unequal, so null factors and null
        // stored subtotals both count as mismatches
        .any(|(row, calc)| row[subtotal_idx].as_f64() != Some(*calc));

    if any_mismatch {
        info!(
            entity = %frame.name(),
            rows = frame.len(),
            "subtotal mismatch detected, recomputing all subtotals"
        );
        for (row, calc) in frame.rows_mut().iter_mut().zip(&calculated) {
            row[subtotal_idx] = Value::Float(*calc);
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::schema::Entity;
    use retail_common::EtlError;

    fn keyed(name: &str, entity: Entity, key_column: usize, ids: &[i64]) -> Frame {
        let mut frame = Frame::new(name, entity.columns());
        for id in ids {
            let mut row: Vec<Value> = entity.columns().iter().map(|_| Value::Null).collect();
            row[key_column] = Value::Int(*id);
            frame.push_row(row).unwrap();
        }
        frame
    }

    fn order_items(rows: &[(i64, i64, i64, f64, f64)]) -> Frame {
        let mut frame = Frame::new("order_items", Entity::OrderItems.columns());
        for (i, (order_id, product_id, quantity, subtotal, price)) in rows.iter().enumerate() {
            frame
                .push_row(vec![
                    Value::Int(i as i64 + 1),
                    Value::Int(*order_id),
                    Value::Int(*product_id),
                    Value::Int(*quantity),
                    Value::Float(*subtotal),
                    Value::Float(*price),
                ])
                .unwrap();
        }
        frame
    }

    fn subtotals(frame: &Frame) -> Vec<f64> {
        frame
            .column_values("order_item_subtotal")
            .unwrap()
            .map(|v| v.as_f64().unwrap())
            .collect()
    }

    #[test]
    fn test_consistent_subtotals_are_left_alone() {
        let orders = keyed("orders", Entity::Orders, 0, &[1]);
        let products = keyed("products", Entity::Products, 0, &[10]);
        // 2 × 50.0 = 100.0 on every row: no recompute is triggered
        let mut frame = order_items(&[(1, 10, 2, 100.0, 50.0), (1, 10, 1, 50.0, 50.0)]);

        transform(&mut frame, &orders, &products).unwrap();
        assert_eq!(subtotals(&frame), vec![100.0, 50.0]);
    }

    #[test]
    fn test_single_mismatch_recomputes_every_row() {
        let orders = keyed("orders", Entity::Orders, 0, &[1]);
        let products = keyed("products", Entity::Products, 0, &[10]);
        // second row stored 49.0, should be 50.0; first row is already right
        let mut frame = order_items(&[(1, 10, 2, 100.0, 50.0), (1, 10, 1, 49.0, 50.0)]);

        transform(&mut frame, &orders, &products).unwrap();
        // bulk policy: both rows end up recomputed
        assert_eq!(subtotals(&frame), vec![100.0, 50.0]);
    }

    #[test]
    fn test_unknown_order_fails_before_subtotals() {
        let orders = keyed("orders", Entity::Orders, 0, &[1]);
        let products = keyed("products", Entity::Products, 0, &[10]);
        let mut frame = order_items(&[(7, 10, 2, 100.0, 50.0)]);

        let err = transform(&mut frame, &orders, &products).unwrap_err();
        assert!(matches!(
            err,
            EtlError::ReferentialIntegrity { ref column, .. } if column == "order_item_order_id"
        ));
    }

    #[test]
    fn test_unknown_product_fails() {
        let orders = keyed("orders", Entity::Orders, 0, &[1]);
        let products = keyed("products", Entity::Products, 0, &[10]);
        let mut frame = order_items(&[(1, 99, 2, 100.0, 50.0)]);

        let err = transform(&mut frame, &orders, &products).unwrap_err();
        assert!(matches!(
            err,
            EtlError::ReferentialIntegrity { ref column, .. } if column == "order_item_product_id"
        ));
    }
}
