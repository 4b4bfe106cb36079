//! Products validation

use super::membership::validate_membership;
use crate::frame::Frame;
use retail_common::Result;

/// Fail if any product_category_id is absent from categories.category_id.
///
/// Note that categories themselves are deliberately not checked against
/// departments; see DESIGN.md.
pub fn validate(frame: &Frame, categories: &Frame) -> Result<()> {
    validate_membership(frame, "product_category_id", categories, "category_id")
}
