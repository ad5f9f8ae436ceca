//! Entity trait binding domain types to store collections

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A persisted document type.
///
/// Every entity carries a store-generated 24-hex id plus creation/update
/// timestamps; the trait tells the persistence gateway which collection the
/// type lives in and what to call it in error messages.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The MongoDB collection name (plural, e.g. "products").
    fn collection_name() -> &'static str;

    /// Display name used in not-found errors (e.g. "Product").
    fn entity_name() -> &'static str;

    /// The entity's id (24-character hexadecimal string).
    fn id(&self) -> &str;
}
