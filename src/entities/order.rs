//! Order entity and schema

use crate::core::Entity;
use crate::core::validation::{Constraint, Field, Schema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PAYMENT_STATUSES: &[&str] = &["Pending", "Completed", "Failed"];
pub const ORDER_STATUSES: &[&str] = &["Processing", "Shipped", "Delivered", "Cancelled"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// One order line. `price` is the unit price the caller declared; it is not
/// reconciled against the referenced product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Reference to a product (24-hex id, format-validated only).
    pub product: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A placed order. `order_total` is caller-declared and deliberately not
/// cross-validated against the line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Reference to the ordering user (24-hex id, format-validated only).
    pub user: String,
    pub products: Vec<OrderLine>,
    pub order_total: f64,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Order {
    fn collection_name() -> &'static str {
        "orders"
    }

    fn entity_name() -> &'static str {
        "Order"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

fn shipping_address_schema() -> Schema {
    Schema::new(vec![
        Field::required("addressLine1", Constraint::nonempty_string()),
        Field::optional("addressLine2", Constraint::string()),
        Field::required("city", Constraint::nonempty_string()),
        Field::required("state", Constraint::nonempty_string()),
        Field::required("postalCode", Constraint::nonempty_string()),
        Field::required("country", Constraint::nonempty_string()),
    ])
}

/// Order schema. Creates validate it in full; updates validate it partially,
/// so a merge like `{"orderStatus": "Shipped"}` touches nothing else.
pub fn schema() -> Schema {
    Schema::new(vec![
        Field::required("user", Constraint::object_id()),
        Field::required(
            "products",
            Constraint::nonempty_array(Constraint::object(Schema::new(vec![
                Field::required("product", Constraint::object_id()),
                Field::required("quantity", Constraint::positive_integer()),
                Field::required("price", Constraint::positive_number()),
            ]))),
        ),
        Field::required("orderTotal", Constraint::positive_number()),
        Field::required(
            "shippingAddress",
            Constraint::object(shipping_address_schema()),
        ),
        Field::required("paymentMethod", Constraint::nonempty_string()),
        Field::required("paymentStatus", Constraint::one_of(PAYMENT_STATUSES)),
        Field::required("orderStatus", Constraint::one_of(ORDER_STATUSES)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample_payload() -> Value {
        json!({
            "user": "507f1f77bcf86cd799439011",
            "products": [
                {"product": "507f191e810c19729de860ea", "quantity": 1, "price": 18.75},
            ],
            "orderTotal": 18.75,
            "shippingAddress": {
                "addressLine1": "1 Station Road",
                "city": "Norwich",
                "state": "Norfolk",
                "postalCode": "NR1 1AA",
                "country": "UK",
            },
            "paymentMethod": "card",
            "paymentStatus": "Pending",
            "orderStatus": "Processing",
        })
    }

    #[test]
    fn test_sample_payload_validates() {
        assert!(schema().validate(&sample_payload()).is_ok());
    }

    #[test]
    fn test_unknown_payment_status_names_the_field() {
        let mut payload = sample_payload();
        payload["paymentStatus"] = json!("Refunded");
        let violations = schema().validate(&payload).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "paymentStatus");
        assert!(violations[0].message.contains("Pending"));
    }

    #[test]
    fn test_empty_products_list_rejected() {
        let mut payload = sample_payload();
        payload["products"] = json!([]);
        let violations = schema().validate(&payload).unwrap_err();
        assert_eq!(violations[0].field, "products");
        assert_eq!(violations[0].message, "must not be empty");
    }

    #[test]
    fn test_malformed_user_reference_rejected() {
        let mut payload = sample_payload();
        payload["user"] = json!("alice");
        let violations = schema().validate(&payload).unwrap_err();
        assert_eq!(violations[0].field, "user");
    }

    #[test]
    fn test_missing_shipping_fields_all_reported() {
        let mut payload = sample_payload();
        payload["shippingAddress"] = json!({"addressLine1": "1 Station Road"});
        let violations = schema().validate(&payload).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"shippingAddress.city"));
        assert!(fields.contains(&"shippingAddress.state"));
        assert!(fields.contains(&"shippingAddress.postalCode"));
        assert!(fields.contains(&"shippingAddress.country"));
    }

    #[test]
    fn test_partial_status_only_update_validates() {
        let fields = schema()
            .validate_partial(&json!({"orderStatus": "Shipped"}))
            .expect("partial update is valid");
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_status_enums_serialize_as_plain_names() {
        assert_eq!(
            serde_json::to_value(PaymentStatus::Completed).unwrap(),
            json!("Completed")
        );
        assert_eq!(
            serde_json::to_value(OrderStatus::Cancelled).unwrap(),
            json!("Cancelled")
        );
    }

    #[test]
    fn test_order_deserializes_from_sanitized_fields() {
        let mut fields = schema().validate(&sample_payload()).expect("valid");
        fields.insert("id".into(), json!("507f1f77bcf86cd799439099"));
        fields.insert("createdAt".into(), json!("2024-06-01T12:00:00Z"));
        fields.insert("updatedAt".into(), json!("2024-06-01T12:00:00Z"));
        let order: Order = serde_json::from_value(Value::Object(fields)).expect("deserializes");
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.shipping_address.address_line2, None);
    }
}
