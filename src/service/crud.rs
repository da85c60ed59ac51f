//! Generic CRUD port over SQLite, parameterized by entity type.
//!
//! Implemented for `SqliteConnection`, so the same calls run on a pooled
//! connection or inside a transaction (`Transaction` derefs to the connection).

use crate::error::AppError;
use crate::models::Entity;
use crate::sql::{delete_where, insert, select_by_id, select_list, update, Filter, QueryBuf};
use async_trait::async_trait;
use sqlx::SqliteConnection;
use uuid::Uuid;

#[async_trait]
pub trait Repository {
    /// Fetch one row by id.
    async fn find_by_id<E: Entity>(&mut self, id: Uuid) -> Result<Option<E>, AppError>;

    /// Rows matching every filter (exact match); all rows when `filters` is empty.
    async fn find_all<E: Entity>(&mut self, filters: &[Filter]) -> Result<Vec<E>, AppError>;

    /// Insert one row. Returns the stored row.
    async fn insert<E: Entity>(&mut self, entity: &E) -> Result<E, AppError>;

    /// Full replace of every non-id column, conditional on the id and every `scope` filter.
    /// Returns false when no row matched.
    async fn update<E: Entity>(&mut self, entity: &E, scope: &[Filter]) -> Result<bool, AppError>;

    /// Delete one row by id. Returns the deleted row or None.
    async fn delete<E: Entity>(&mut self, id: Uuid) -> Result<Option<E>, AppError>;

    /// Delete every row matching all filters. Returns the deleted rows.
    async fn delete_many<E: Entity>(&mut self, filters: &[Filter]) -> Result<Vec<E>, AppError>;
}

#[async_trait]
impl Repository for SqliteConnection {
    async fn find_by_id<E: Entity>(&mut self, id: Uuid) -> Result<Option<E>, AppError> {
        let q = select_by_id(&E::TABLE, id.into());
        fetch_optional(self, &q).await
    }

    async fn find_all<E: Entity>(&mut self, filters: &[Filter]) -> Result<Vec<E>, AppError> {
        let q = select_list(&E::TABLE, filters);
        fetch_all(self, &q).await
    }

    async fn insert<E: Entity>(&mut self, entity: &E) -> Result<E, AppError> {
        let q = insert(&E::TABLE, entity.values());
        fetch_optional(self, &q)
            .await?
            .ok_or_else(|| AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn update<E: Entity>(&mut self, entity: &E, scope: &[Filter]) -> Result<bool, AppError> {
        let q = update(&E::TABLE, entity.values(), scope);
        tracing::debug!(sql = %q.sql, params = q.params.len(), "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query.execute(&mut *self).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete<E: Entity>(&mut self, id: Uuid) -> Result<Option<E>, AppError> {
        let q = delete_where(&E::TABLE, &[Filter::eq(E::TABLE.columns[0], id)]);
        fetch_optional(self, &q).await
    }

    async fn delete_many<E: Entity>(&mut self, filters: &[Filter]) -> Result<Vec<E>, AppError> {
        let q = delete_where(&E::TABLE, filters);
        fetch_all(self, &q).await
    }
}

async fn fetch_optional<E: Entity>(conn: &mut SqliteConnection, q: &QueryBuf) -> Result<Option<E>, AppError> {
    tracing::debug!(sql = %q.sql, params = q.params.len(), "query");
    let mut query = sqlx::query_as::<_, E>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_optional(conn).await?)
}

async fn fetch_all<E: Entity>(conn: &mut SqliteConnection, q: &QueryBuf) -> Result<Vec<E>, AppError> {
    tracing::debug!(sql = %q.sql, params = q.params.len(), "query");
    let mut query = sqlx::query_as::<_, E>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(conn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductOption};
    use crate::store;
    use sqlx::SqlitePool;

    async fn pool() -> SqlitePool {
        store::connect_in_memory().await.expect("in-memory store")
    }

    fn product(name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.into(),
            description: format!("{} Description", name),
            price: 1.5,
            delivery_price: 0.5,
        }
    }

    fn option(product_id: Uuid, name: &str) -> ProductOption {
        ProductOption {
            id: Uuid::new_v4(),
            product_id,
            name: name.into(),
            description: format!("{} Description", name),
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let p = product("Widget");
        let stored = conn.insert(&p).await.unwrap();
        assert_eq!(stored, p);
        let found: Option<Product> = conn.find_by_id(p.id).await.unwrap();
        assert_eq!(found, Some(p));
        let missing: Option<Product> = conn.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn find_all_filters_by_exact_match() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        for name in ["Widget", "widget", "Widget Pro"] {
            conn.insert(&product(name)).await.unwrap();
        }
        let all: Vec<Product> = conn.find_all(&[]).await.unwrap();
        assert_eq!(all.len(), 3);
        let exact: Vec<Product> = conn.find_all(&[Filter::eq("name", "Widget")]).await.unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].name, "Widget");
    }

    #[tokio::test]
    async fn update_reports_missing_rows() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut p = product("Widget");
        conn.insert(&p).await.unwrap();

        p.name = "Gadget".into();
        assert!(conn.update(&p, &[]).await.unwrap());
        let found: Option<Product> = conn.find_by_id(p.id).await.unwrap();
        assert_eq!(found.unwrap().name, "Gadget");

        let ghost = product("Ghost");
        assert!(!conn.update(&ghost, &[]).await.unwrap());
        let all: Vec<Product> = conn.find_all(&[]).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn scoped_update_does_not_move_rows() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let a = conn.insert(&product("A")).await.unwrap();
        let b = conn.insert(&product("B")).await.unwrap();
        let o = conn.insert(&option(a.id, "PO")).await.unwrap();

        let mut moved = o.clone();
        moved.product_id = b.id;
        let matched = conn
            .update(&moved, &[Filter::eq("product_id", b.id)])
            .await
            .unwrap();
        assert!(!matched);
        let found: Option<ProductOption> = conn.find_by_id(o.id).await.unwrap();
        assert_eq!(found.unwrap().product_id, a.id);
    }

    #[tokio::test]
    async fn delete_returns_row() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let p = conn.insert(&product("Widget")).await.unwrap();
        let deleted: Option<Product> = conn.delete(p.id).await.unwrap();
        assert_eq!(deleted, Some(p.clone()));
        let again: Option<Product> = conn.delete(p.id).await.unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn delete_many_in_transaction_rolls_back_on_drop() {
        let pool = pool().await;
        let p = {
            let mut conn = pool.acquire().await.unwrap();
            let p = conn.insert(&product("Widget")).await.unwrap();
            for name in ["PO 1", "PO 2"] {
                conn.insert(&option(p.id, name)).await.unwrap();
            }
            p
        };

        {
            let mut tx = pool.begin().await.unwrap();
            let deleted: Vec<ProductOption> = tx
                .delete_many(&[Filter::eq("product_id", p.id)])
                .await
                .unwrap();
            assert_eq!(deleted.len(), 2);
            // dropped without commit
        }

        let mut conn = pool.acquire().await.unwrap();
        let remaining: Vec<ProductOption> = conn
            .find_all(&[Filter::eq("product_id", p.id)])
            .await
            .unwrap();
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn foreign_key_rejects_orphan_option() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let res = conn.insert(&option(Uuid::new_v4(), "Orphan")).await;
        assert!(matches!(res, Err(AppError::Db(_))));
    }
}
