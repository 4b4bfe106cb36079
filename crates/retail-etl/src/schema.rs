//! Entity catalog: column schemas, table names, and the load order
//!
//! Source files carry no header row, so the column names and types here are
//! the single source of truth for how each entity is read and loaded.

use crate::frame::{Column, ColumnType};

/// The six retail entities, in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Departments,
    Categories,
    Customers,
    Products,
    Orders,
    OrderItems,
}

impl Entity {
    /// Fixed dependency order for both processing and loading.
    ///
    /// Parents always precede children: departments before categories,
    /// categories before products, customers before orders, and orders and
    /// products before order_items.
    pub const LOAD_ORDER: [Entity; 6] = [
        Entity::Departments,
        Entity::Categories,
        Entity::Customers,
        Entity::Products,
        Entity::Orders,
        Entity::OrderItems,
    ];

    /// Entity name; also the destination table name
    pub fn table_name(self) -> &'static str {
        match self {
            Entity::Departments => "departments",
            Entity::Categories => "categories",
            Entity::Customers => "customers",
            Entity::Products => "products",
            Entity::Orders => "orders",
            Entity::OrderItems => "order_items",
        }
    }

    fn column_specs(self) -> &'static [(&'static str, ColumnType)] {
        match self {
            Entity::Departments => &[
                ("department_id", ColumnType::Int),
                ("department_name", ColumnType::Text),
            ],
            Entity::Categories => &[
                ("category_id", ColumnType::Int),
                ("category_department_id", ColumnType::Int),
                ("category_name", ColumnType::Text),
            ],
            Entity::Customers => &[
                ("customer_id", ColumnType::Int),
                ("customer_fname", ColumnType::Text),
                ("customer_lname", ColumnType::Text),
                ("customer_email", ColumnType::Text),
                ("customer_password", ColumnType::Text),
                ("customer_street", ColumnType::Text),
                ("customer_city", ColumnType::Text),
                ("customer_state", ColumnType::Text),
                ("customer_zipcode", ColumnType::Text),
            ],
            Entity::Products => &[
                ("product_id", ColumnType::Int),
                ("product_category_id", ColumnType::Int),
                ("product_name", ColumnType::Text),
                ("product_description", ColumnType::Text),
                ("product_price", ColumnType::Float),
                ("product_image", ColumnType::Text),
            ],
            // order_date is read as text and parsed to a timestamp by the
            // orders transform
            Entity::Orders => &[
                ("order_id", ColumnType::Int),
                ("order_date", ColumnType::Text),
                ("order_customer_id", ColumnType::Int),
                ("order_status", ColumnType::Text),
            ],
            Entity::OrderItems => &[
                ("order_item_id", ColumnType::Int),
                ("order_item_order_id", ColumnType::Int),
                ("order_item_product_id", ColumnType::Int),
                ("order_item_quantity", ColumnType::Int),
                ("order_item_subtotal", ColumnType::Float),
                ("order_item_product_price", ColumnType::Float),
            ],
        }
    }

    /// Column schema for the reader and loader
    pub fn columns(self) -> Vec<Column> {
        self.column_specs()
            .iter()
            .map(|(name, ty)| Column::new(*name, *ty))
            .collect()
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}
