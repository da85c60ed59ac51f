//! Product handlers: list, read, create, update, delete (cascading to options).

use super::parse_id;
use crate::error::AppError;
use crate::models::{Product, ProductInput, ProductOption};
use crate::response::{created, no_content, success_many, success_one_ok};
use crate::routes::API_PREFIX;
use crate::service::Repository;
use crate::sql::Filter;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
}

pub fn location(id: Uuid) -> String {
    format!("{}/products/{}", API_PREFIX, id)
}

/// All products, or only those whose name equals `?name=` exactly.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filters = match params.name.filter(|n| !n.is_empty()) {
        Some(name) => vec![Filter::eq("name", name)],
        None => Vec::new(),
    };
    let mut conn = state.pool.acquire().await?;
    let items = conn.find_all::<Product>(&filters).await?;
    Ok(success_many(items))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut conn = state.pool.acquire().await?;
    let product = conn
        .find_by_id::<Product>(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", id)))?;
    Ok(success_one_ok(product))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input = ProductInput::from_body(body)?;
    let product = input.into_product(Uuid::new_v4());
    let mut conn = state.pool.acquire().await?;
    let stored = conn.insert(&product).await?;
    tracing::info!(id = %stored.id, "product created");
    Ok(created(location(stored.id), stored))
}

/// Full replace. The id always comes from the path.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let product = ProductInput::from_body(body)?.into_product(id);
    let mut conn = state.pool.acquire().await?;
    // Conditional update: the affected-row count is the existence check.
    if !conn.update(&product, &[]).await? {
        return Err(AppError::NotFound(format!("product {}", id)));
    }
    Ok(no_content())
}

/// Deletes the product and every option it owns in one transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut tx = state.pool.begin().await?;
    let options = tx.delete_many::<ProductOption>(&[Filter::eq("product_id", id)]).await?;
    let product = match tx.delete::<Product>(id).await? {
        Some(p) => p,
        // tx dropped here: rolled back
        None => return Err(AppError::NotFound(format!("product {}", id))),
    };
    tx.commit().await?;
    tracing::info!(id = %id, options = options.len(), "product deleted");
    Ok(success_one_ok(product))
}
