//! Loader: append a frame's rows into a named destination table
//!
//! Destination tables pre-exist and are named after their entity. Loads are
//! append-only (never truncate or replace) and each table's insert commits
//! on its own: there is no transaction spanning the load sequence, so a
//! failure partway through leaves earlier tables committed.

use crate::config::DatabaseConfig;
use crate::frame::{ColumnType, Frame, Value};
use chrono::NaiveDateTime;
use retail_common::{EtlError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Rows per INSERT statement; 9 columns max keeps this well under the
/// postgres bind-parameter limit
const INSERT_CHUNK_SIZE: usize = 1000;

/// Destination for validated frames.
///
/// The pipeline is generic over this trait so the orchestration and
/// validation logic can be exercised without a live database.
#[allow(async_fn_in_trait)]
pub trait TableLoader {
    /// Append every row of `frame` to the table named `frame.name()`,
    /// returning the number of rows written
    async fn load(&self, frame: &Frame) -> Result<u64>;
}

/// Create the shared connection pool, acquired once at process start
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| EtlError::connection(e.to_string()))?;

    info!("database connection established");
    Ok(pool)
}

/// PostgreSQL loader backed by a sqlx pool
#[derive(Debug, Clone)]
pub struct PgLoader {
    pool: PgPool,
}

impl PgLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TableLoader for PgLoader {
    async fn load(&self, frame: &Frame) -> Result<u64> {
        if frame.is_empty() {
            debug!(table = %frame.name(), "nothing to load");
            return Ok(0);
        }

        let column_list = frame
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut total: u64 = 0;
        for chunk in frame.rows().chunks(INSERT_CHUNK_SIZE) {
            let mut query_builder = sqlx::QueryBuilder::new(format!(
                "INSERT INTO {} ({}) ",
                frame.name(),
                column_list
            ));

            query_builder.push_values(chunk, |mut b, row| {
                for (column, value) in frame.columns().iter().zip(row) {
                    match value {
                        Value::Int(n) => {
                            b.push_bind(*n);
                        }
                        Value::Float(v) => {
                            b.push_bind(*v);
                        }
                        Value::Text(s) => {
                            b.push_bind(s.clone());
                        }
                        Value::Timestamp(ts) => {
                            b.push_bind(*ts);
                        }
                        // Nulls bind with their column's type so postgres
                        // can infer the parameter
                        Value::Null => match column.ty {
                            ColumnType::Int => {
                                b.push_bind(Option::<i64>::None);
                            }
                            ColumnType::Float => {
                                b.push_bind(Option::<f64>::None);
                            }
                            ColumnType::Text => {
                                b.push_bind(Option::<String>::None);
                            }
                            ColumnType::Timestamp => {
                                b.push_bind(Option::<NaiveDateTime>::None);
                            }
                        },
                    }
                }
            });

            let result = query_builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| EtlError::load(frame.name(), e))?;
            total += result.rows_affected();
        }

        info!(table = %frame.name(), rows = total, "table loaded");
        Ok(total)
    }
}

/// Loader that counts and discards rows; backs the CLI `--dry-run` mode
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLoader;

impl TableLoader for NullLoader {
    async fn load(&self, frame: &Frame) -> Result<u64> {
        info!(table = %frame.name(), rows = frame.len(), "dry run, rows discarded");
        Ok(frame.len() as u64)
    }
}
