//! Resource records and the `Entity` description the persistence port works from.

mod product;
mod product_option;

pub use product::{Product, ProductInput};
pub use product_option::{ProductOption, ProductOptionInput};

use crate::sql::{SqlValue, TableDef};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

/// A persisted record: one table, id column first.
pub trait Entity: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    const TABLE: TableDef;

    fn id(&self) -> Uuid;

    /// Bind values in `TABLE.columns` order.
    fn values(&self) -> Vec<SqlValue>;
}

/// Collection envelope: `{ "items": [...] }`.
#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> Items<T> {
    pub fn new(items: Vec<T>) -> Self {
        Items { items }
    }
}
