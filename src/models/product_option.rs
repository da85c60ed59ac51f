use crate::models::Entity;
use crate::service::{RequestValidator, ValidationRule};
use crate::sql::{SqlValue, TableDef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProductOption {
    pub id: Uuid,
    /// Owning product. Internal linkage only, never serialized.
    #[serde(skip)]
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
}

impl Entity for ProductOption {
    const TABLE: TableDef = TableDef {
        name: "product_options",
        columns: &["id", "product_id", "name", "description"],
    };

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.product_id.into(),
            self.name.as_str().into(),
            self.description.as_str().into(),
        ]
    }
}

/// Create/update payload. `id` and `productId` in the body are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductOptionInput {
    pub name: String,
    pub description: String,
}

impl ProductOptionInput {
    pub const RULES: &'static [(&'static str, ValidationRule)] = &[
        ("name", ValidationRule::TEXT),
        ("description", ValidationRule::TEXT),
    ];

    pub fn from_body(body: serde_json::Value) -> Result<Self, crate::error::AppError> {
        RequestValidator::parse(body, Self::RULES)
    }

    pub fn into_option(self, id: Uuid, product_id: Uuid) -> ProductOption {
        ProductOption {
            id,
            product_id,
            name: self.name,
            description: self.description,
        }
    }
}
