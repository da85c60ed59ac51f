//! Persistence port and request validation.

mod crud;
mod validation;
pub use crud::Repository;
pub use validation::{RequestValidator, ValidationRule};
