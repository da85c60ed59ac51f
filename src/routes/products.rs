//! Product and product option routes.
//! Product id is `:id` on every product-scoped path; option routes add `:option_id`.

use crate::handlers::{product, product_option};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Mount point of the resource routes; `Location` headers are built from it.
pub const API_PREFIX: &str = "/api";

const BODY_LIMIT: usize = 64 * 1024;

/// Resource routes, relative to `API_PREFIX`.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(product::list).post(product::create))
        .route(
            "/products/:id",
            get(product::read).put(product::update).delete(product::delete),
        )
        .route(
            "/products/:id/options",
            get(product_option::list).post(product_option::create),
        )
        .route(
            "/products/:id/options/:option_id",
            get(product_option::read)
                .put(product_option::update)
                .delete(product_option::delete),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .with_state(state)
}

/// Full application: health/readiness/version plus resource routes under `API_PREFIX`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, api_routes(state))
}
