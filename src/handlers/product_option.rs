//! Product option handlers, all scoped by the owning product id in the path.

use super::parse_id;
use crate::error::AppError;
use crate::models::{Product, ProductOption, ProductOptionInput};
use crate::response::{created, no_content, success_many, success_one_ok};
use crate::routes::API_PREFIX;
use crate::service::Repository;
use crate::sql::Filter;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

pub fn location(product_id: Uuid, id: Uuid) -> String {
    format!("{}/products/{}/options/{}", API_PREFIX, product_id, id)
}

fn scope(product_id: Uuid, id: Uuid) -> [Filter; 2] {
    [Filter::eq("id", id), Filter::eq("product_id", product_id)]
}

pub async fn list(
    State(state): State<AppState>,
    Path(product_id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product_id = parse_id(&product_id_str)?;
    let mut conn = state.pool.acquire().await?;
    if conn.find_by_id::<Product>(product_id).await?.is_none() {
        return Err(AppError::NotFound(format!("product {}", product_id)));
    }
    let items = conn.find_all::<ProductOption>(&[Filter::eq("product_id", product_id)]).await?;
    Ok(success_many(items))
}

/// An option that exists under a different product is not found here.
pub async fn read(
    State(state): State<AppState>,
    Path((product_id_str, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let product_id = parse_id(&product_id_str)?;
    let id = parse_id(&id_str)?;
    let mut conn = state.pool.acquire().await?;
    let option = conn
        .find_all::<ProductOption>(&scope(product_id, id))
        .await?
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("option {} of product {}", id, product_id)))?;
    Ok(success_one_ok(option))
}

/// A missing parent product is a bad request, not a missing resource.
pub async fn create(
    State(state): State<AppState>,
    Path(product_id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let product_id = parse_id(&product_id_str)?;
    let option = ProductOptionInput::from_body(body)?.into_option(Uuid::new_v4(), product_id);
    let mut conn = state.pool.acquire().await?;
    // The product_id foreign key is the parent existence check.
    let stored = match conn.insert(&option).await {
        Ok(stored) => stored,
        Err(AppError::Db(sqlx::Error::Database(e))) if e.is_foreign_key_violation() => {
            tracing::warn!(%product_id, "option create for missing product");
            return Err(AppError::BadRequest(format!("product {} does not exist", product_id)));
        }
        Err(e) => return Err(e),
    };
    tracing::info!(id = %stored.id, %product_id, "option created");
    Ok(created(location(product_id, stored.id), stored))
}

/// Full replace of an option owned by the path product. Options cannot be
/// moved between products: an id owned by another product is not found.
pub async fn update(
    State(state): State<AppState>,
    Path((product_id_str, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let product_id = parse_id(&product_id_str)?;
    let id = parse_id(&id_str)?;
    let option = ProductOptionInput::from_body(body)?.into_option(id, product_id);
    let mut conn = state.pool.acquire().await?;
    if !conn.update(&option, &[Filter::eq("product_id", product_id)]).await? {
        return Err(AppError::NotFound(format!("option {} of product {}", id, product_id)));
    }
    Ok(no_content())
}

pub async fn delete(
    State(state): State<AppState>,
    Path((product_id_str, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let product_id = parse_id(&product_id_str)?;
    let id = parse_id(&id_str)?;
    let mut conn = state.pool.acquire().await?;
    let option = conn
        .delete_many::<ProductOption>(&scope(product_id, id))
        .await?
        .pop()
        .ok_or_else(|| AppError::NotFound(format!("option {} of product {}", id, product_id)))?;
    tracing::info!(%id, %product_id, "option deleted");
    Ok(success_one_ok(option))
}
