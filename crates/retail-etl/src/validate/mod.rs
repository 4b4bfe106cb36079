//! Entity validators and transforms
//!
//! One module per entity, plus the reusable cross-entity membership
//! validator. Validators take frames and return typed results; they never
//! log-and-exit themselves, so each one is testable in isolation. The first
//! error aborts the whole run.

pub mod customers;
pub mod departments;
pub mod membership;
pub mod order_items;
pub mod orders;
pub mod products;

pub use membership::validate_membership;
