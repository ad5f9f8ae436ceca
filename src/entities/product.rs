//! Product (book) entity and schema

use crate::core::Entity;
use crate::core::validation::{Constraint, Field, Schema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub original: f64,
    pub discounted: f64,
    pub discount_percentage: f64,
}

/// A catalogue entry. Products live independently of carts and orders: no
/// referential integrity is enforced against documents that reference them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub author: String,
    pub binding: String,
    pub reward_points: i64,
    pub product_code: String,
    pub availability: String,
    pub price: Price,
    /// Opaque review objects; their shape is not constrained.
    pub review: Vec<Value>,
    pub reviews_count: i64,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Product {
    fn collection_name() -> &'static str {
        "products"
    }

    fn entity_name() -> &'static str {
        "Product"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Full product schema, used for both create and replace.
pub fn schema() -> Schema {
    Schema::new(vec![
        Field::required("title", Constraint::nonempty_string()),
        Field::required("author", Constraint::nonempty_string()),
        Field::required("binding", Constraint::nonempty_string()),
        Field::required("rewardPoints", Constraint::nonnegative_integer()),
        Field::required("productCode", Constraint::nonempty_string()),
        Field::required("availability", Constraint::nonempty_string()),
        Field::required(
            "price",
            Constraint::object(Schema::new(vec![
                Field::required("original", Constraint::positive_number()),
                Field::required("discounted", Constraint::positive_number()),
                Field::required("discountPercentage", Constraint::number_range(0.0, 100.0)),
            ])),
        ),
        Field::required("review", Constraint::array(Constraint::any())),
        Field::required("reviewsCount", Constraint::nonnegative_integer()),
        Field::required("description", Constraint::nonempty_string()),
        Field::required("image", Constraint::url()),
    ])
}
