//! Products API: REST CRUD for products and their options on SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use models::{Entity, Items, Product, ProductInput, ProductOption, ProductOptionInput};
pub use routes::{api_routes, app, common_routes, API_PREFIX};
pub use service::Repository;
pub use state::AppState;
