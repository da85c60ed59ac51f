//! HTTP handlers for products and their options.

pub mod product;
pub mod product_option;

use crate::error::AppError;
use uuid::Uuid;

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest(format!("invalid uuid: {}", id_str)))
}
