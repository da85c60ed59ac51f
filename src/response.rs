//! Response helpers: collection envelope, created-with-location, ok.

use crate::models::Items;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn success_many<T: Serialize>(items: Vec<T>) -> (StatusCode, Json<Items<T>>) {
    (StatusCode::OK, Json(Items::new(items)))
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(location: String, data: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(data),
    )
        .into_response()
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
