//! Retail ETL Library
//!
//! Batch pipeline that reads pipe-delimited retail extracts, validates them
//! against business rules and cross-entity referential integrity, and appends
//! the results to a relational store in dependency order.
//!
//! # Entities
//!
//! Six entities are processed per run, in a fixed order that respects their
//! foreign-key relationships:
//!
//! departments → categories → customers → products → orders → order_items
//!
//! The run is all-or-nothing up to the load phase: the first validation
//! failure aborts everything before a single row is written. The load phase
//! itself commits one table at a time with no cross-table transaction, so a
//! load failure leaves earlier tables committed (append-only, at-least-once
//! semantics).
//!
//! # Example
//!
//! ```no_run
//! use retail_etl::config::EtlConfig;
//! use retail_etl::load::NullLoader;
//! use retail_etl::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EtlConfig::load()?;
//!     let pipeline = Pipeline::new(config, NullLoader::default());
//!     pipeline.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod frame;
pub mod load;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod validate;

// Re-export commonly used types
pub use retail_common::{EtlError, Result};
