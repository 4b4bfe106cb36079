//! Pipeline orchestrator
//!
//! Drives one batch run end to end: read, validate/transform and stash each
//! entity in strict order, then load every frame in the fixed dependency
//! order. Any failure is terminal; the orchestrator never resumes, skips or
//! retries an entity. That guarantee is what keeps the destination store
//! free of referentially broken snapshots: nothing is loaded until every
//! entity has passed validation.

use crate::config::EtlConfig;
use crate::frame::Frame;
use crate::load::TableLoader;
use crate::reader::read_source;
use crate::schema::Entity;
use crate::validate;
use retail_common::{EtlError, Result};
use std::collections::HashMap;
use tracing::info;

/// One-shot batch pipeline over a destination loader
pub struct Pipeline<L: TableLoader> {
    config: EtlConfig,
    loader: L,
}

impl<L: TableLoader> Pipeline<L> {
    /// Create a new pipeline
    pub fn new(config: EtlConfig, loader: L) -> Self {
        Self { config, loader }
    }

    /// Execute one run, returning the rows loaded per entity.
    ///
    /// Stage order: departments → categories → customers → products →
    /// orders → order_items → load. The load phase walks
    /// [`Entity::LOAD_ORDER`]; a load failure aborts the remaining sequence
    /// and leaves already-loaded tables committed.
    pub async fn run(&self) -> Result<Vec<(Entity, u64)>> {
        info!("pipeline run started");

        let mut frames: HashMap<Entity, Frame> = HashMap::new();

        let departments = self.read(Entity::Departments)?;
        validate::departments::validate(&departments)?;
        info!(entity = %Entity::Departments, "validated");
        frames.insert(Entity::Departments, departments);

        // Categories carry a department foreign key that is deliberately
        // left unchecked; see DESIGN.md
        let categories = self.read(Entity::Categories)?;
        frames.insert(Entity::Categories, categories);

        let mut customers = self.read(Entity::Customers)?;
        validate::customers::transform(&mut customers)?;
        info!(entity = %Entity::Customers, "validated");
        frames.insert(Entity::Customers, customers);

        let products = self.read(Entity::Products)?;
        validate::products::validate(&products, &frames[&Entity::Categories])?;
        info!(entity = %Entity::Products, "validated");
        frames.insert(Entity::Products, products);

        let mut orders = self.read(Entity::Orders)?;
        validate::orders::transform(&mut orders, &frames[&Entity::Customers])?;
        info!(entity = %Entity::Orders, "validated");
        frames.insert(Entity::Orders, orders);

        let mut order_items = self.read(Entity::OrderItems)?;
        validate::order_items::transform(
            &mut order_items,
            &frames[&Entity::Orders],
            &frames[&Entity::Products],
        )?;
        info!(entity = %Entity::OrderItems, "validated");
        frames.insert(Entity::OrderItems, order_items);

        let mut loaded = Vec::with_capacity(Entity::LOAD_ORDER.len());
        for entity in Entity::LOAD_ORDER {
            let frame = frames.get(&entity).ok_or_else(|| {
                EtlError::config(format!("no frame staged for entity '{entity}'"))
            })?;
            let rows = self.loader.load(frame).await?;
            loaded.push((entity, rows));
        }

        info!("pipeline run completed successfully");
        Ok(loaded)
    }

    fn read(&self, entity: Entity) -> Result<Frame> {
        let path = self.config.source_path(entity);
        read_source(&path, entity)
    }
}
