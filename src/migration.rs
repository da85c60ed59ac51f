//! Schema DDL for the products and product_options tables. Idempotent.

use crate::error::AppError;
use sqlx::SqlitePool;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "products" (
        "id" BLOB PRIMARY KEY NOT NULL,
        "name" TEXT NOT NULL,
        "description" TEXT NOT NULL,
        "price" REAL NOT NULL,
        "delivery_price" REAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "product_options" (
        "id" BLOB PRIMARY KEY NOT NULL,
        "product_id" BLOB NOT NULL REFERENCES "products" ("id") ON DELETE CASCADE,
        "name" TEXT NOT NULL,
        "description" TEXT NOT NULL
    )
    "#,
    r#"CREATE INDEX IF NOT EXISTS "product_options_product_id" ON "product_options" ("product_id")"#,
];

/// Create tables and indexes if they do not exist yet.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in DDL {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}
