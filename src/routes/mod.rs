//! Router construction.

mod common;
mod products;

pub use common::common_routes;
pub use products::{api_routes, app, API_PREFIX};
