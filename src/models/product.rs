use crate::models::Entity;
use crate::service::{RequestValidator, ValidationRule};
use crate::sql::{SqlValue, TableDef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub delivery_price: f64,
}

impl Entity for Product {
    const TABLE: TableDef = TableDef {
        name: "products",
        columns: &["id", "name", "description", "price", "delivery_price"],
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.description.as_str().into(),
            self.price.into(),
            self.delivery_price.into(),
        ]
    }
}

/// Create/update payload. Any `id` in the body is ignored; the server decides it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub delivery_price: f64,
}

impl ProductInput {
    pub const RULES: &'static [(&'static str, ValidationRule)] = &[
        ("name", ValidationRule::TEXT),
        ("description", ValidationRule::TEXT),
        ("price", ValidationRule::NON_NEGATIVE),
        ("deliveryPrice", ValidationRule::NON_NEGATIVE),
    ];

    /// Validate a raw JSON body and deserialize it.
    pub fn from_body(body: serde_json::Value) -> Result<Self, crate::error::AppError> {
        RequestValidator::parse(body, Self::RULES)
    }

    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            delivery_price: self.delivery_price,
        }
    }
}
