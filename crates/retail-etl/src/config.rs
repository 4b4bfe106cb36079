//! Configuration management
//!
//! Everything the pipeline needs from the outside world: destination
//! connection parameters, the entity-to-source-file map, and logging knobs
//! (the latter live in `retail_common::logging`). Loaded from the environment
//! (plus `.env` via dotenvy) with explicit defaults, then validated.

use crate::schema::Entity;
use retail_common::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/retail_db";

/// Default maximum database connections in the pool.
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default database connection timeout in seconds.
pub const DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default directory holding one pipe-delimited file per entity.
pub const DEFAULT_DATA_DIR: &str = "./data_retail";

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    pub database: DatabaseConfig,
    pub sources: SourceConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Source file configuration
///
/// Each entity's extract is expected at `<data_dir>/<entity>` (no file
/// extension, matching the upstream export naming), unless overridden for
/// that entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub data_dir: PathBuf,
    /// Per-entity path overrides, keyed by entity name
    #[serde(default)]
    pub overrides: HashMap<String, PathBuf>,
}

impl EtlConfig {
    /// Load configuration from environment and defaults
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: destination connection string
    /// - `DATABASE_MAX_CONNECTIONS`: pool size
    /// - `DATABASE_CONNECT_TIMEOUT`: connect timeout in seconds
    /// - `RETAIL_DATA_DIR`: directory with one file per entity
    /// - `RETAIL_<ENTITY>_FILE`: per-entity source override
    ///   (e.g. `RETAIL_ORDER_ITEMS_FILE`)
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut overrides = HashMap::new();
        for entity in Entity::LOAD_ORDER {
            let key = format!("RETAIL_{}_FILE", entity.table_name().to_uppercase());
            if let Ok(path) = std::env::var(&key) {
                overrides.insert(entity.table_name().to_string(), PathBuf::from(path));
            }
        }

        let config = EtlConfig {
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
                connect_timeout_secs: std::env::var("DATABASE_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS),
            },
            sources: SourceConfig {
                data_dir: std::env::var("RETAIL_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
                overrides,
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(EtlError::config("Database URL cannot be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(EtlError::config(
                "Database max_connections must be greater than 0",
            ));
        }

        if self.sources.data_dir.as_os_str().is_empty() {
            return Err(EtlError::config("Data directory cannot be empty"));
        }

        Ok(())
    }

    /// Resolve the source file path for one entity
    pub fn source_path(&self, entity: Entity) -> PathBuf {
        self.sources
            .overrides
            .get(entity.table_name())
            .cloned()
            .unwrap_or_else(|| self.sources.data_dir.join(entity.table_name()))
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
                connect_timeout_secs: DEFAULT_DATABASE_CONNECT_TIMEOUT_SECS,
            },
            sources: SourceConfig {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                overrides: HashMap::new(),
            },
        }
    }
}
