//! Reference resolution for read paths
//!
//! Orders and carts store references to users and products as plain 24-hex
//! ids. Read endpoints return the referenced documents embedded in place of
//! the ids, so clients never need a second round trip. A reference whose
//! target no longer exists resolves to JSON `null` rather than failing the
//! whole read.

use crate::core::{ApiResult, Entity};
use crate::entities::{Cart, Order, Product, User};
use crate::storage::MongoGateway;
use serde_json::{Map, Value};

/// Expands entity references into embedded documents.
#[derive(Clone, Debug)]
pub struct ReferenceResolver {
    users: MongoGateway<User>,
    products: MongoGateway<Product>,
}

impl ReferenceResolver {
    pub fn new(users: MongoGateway<User>, products: MongoGateway<Product>) -> Self {
        Self { users, products }
    }

    /// Resolve an order's `user` and each line's `product` reference.
    pub async fn resolve_order(&self, order: &Order) -> ApiResult<Value> {
        let mut doc = to_object(order)?;
        let user = self.lookup_user(&order.user).await?;
        doc.insert("user".into(), user);

        if let Some(Value::Array(lines)) = doc.get_mut("products") {
            for (line, source) in lines.iter_mut().zip(&order.products) {
                if let Value::Object(line) = line {
                    let product = self.lookup_product(&source.product).await?;
                    line.insert("product".into(), product);
                }
            }
        }
        Ok(Value::Object(doc))
    }

    /// Resolve a cart's `userId` and each item's `productId` reference.
    pub async fn resolve_cart(&self, cart: &Cart) -> ApiResult<Value> {
        let mut doc = to_object(cart)?;
        let user = self.lookup_user(&cart.user_id).await?;
        doc.insert("userId".into(), user);

        if let Some(Value::Array(items)) = doc.get_mut("items") {
            for (item, source) in items.iter_mut().zip(&cart.items) {
                if let Value::Object(item) = item {
                    let product = self.lookup_product(&source.product_id).await?;
                    item.insert("productId".into(), product);
                }
            }
        }
        Ok(Value::Object(doc))
    }

    async fn lookup_user(&self, id: &str) -> ApiResult<Value> {
        match self.users.get(id).await? {
            Some(user) => public_user(&user),
            None => Ok(Value::Null),
        }
    }

    async fn lookup_product(&self, id: &str) -> ApiResult<Value> {
        match self.products.get(id).await? {
            Some(product) => Ok(serde_json::to_value(product)?),
            None => Ok(Value::Null),
        }
    }
}

fn to_object<T: Entity>(entity: &T) -> ApiResult<Map<String, Value>> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!("entity serialized to non-object: {}", other).into()),
    }
}

/// A user document safe to embed in responses. The credential hash never
/// leaves the service.
fn public_user(user: &User) -> ApiResult<Value> {
    let mut doc = to_object(user)?;
    doc.remove("passwordHash");
    Ok(Value::Object(doc))
}
