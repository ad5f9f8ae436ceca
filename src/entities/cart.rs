//! Shopping cart entity and schema

use crate::core::Entity;
use crate::core::validation::{Constraint, Field, Schema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Reference to a product; existence is not enforced.
    pub product_id: String,
    pub quantity: i64,
}

/// A cart exists independently of the order lifecycle: it is never
/// converted into an order automatically, and `total_price` is not
/// cross-checked against the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    /// Reference to the owning user; existence is not enforced.
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Cart {
    fn collection_name() -> &'static str {
        "carts"
    }

    fn entity_name() -> &'static str {
        "Cart"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Full cart schema, used for both create and replace. The reference fields
/// are opaque strings: existence is never checked and the format is not
/// constrained.
pub fn schema() -> Schema {
    Schema::new(vec![
        Field::required("userId", Constraint::string()),
        Field::required(
            "items",
            Constraint::array(Constraint::object(Schema::new(vec![
                Field::required("productId", Constraint::string()),
                Field::required("quantity", Constraint::positive_integer()),
            ]))),
        ),
        Field::required("totalPrice", Constraint::nonnegative_number()),
    ])
}
