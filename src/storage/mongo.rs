//! MongoDB persistence gateway using the official async driver.
//!
//! # Storage model
//!
//! Collection-per-entity-type: each `MongoGateway<T>` operates on the
//! collection named by `T::collection_name()` ("users", "products", "carts",
//! "orders"). The gateway performs no validation; payloads reach it already
//! checked by the schema validator.
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. This keeps ids (24-hex strings) and
//! DateTime values (ISO 8601 strings) handled uniformly. The `id` field is
//! mapped to MongoDB's `_id` convention in both directions.
//!
//! # Document lifecycle
//!
//! `insert` assigns a fresh ObjectId-hex `id` and `createdAt`/`updatedAt`
//! stamps and returns the document as stored. `update` is a `$set` merge of
//! only the supplied fields (always including a fresh `updatedAt`), returning
//! the post-update document or `None` when nothing matched. Concurrent
//! updates are last-write-wins; there is no optimistic concurrency token.

use crate::core::Entity;
use anyhow::{Result, anyhow};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// Document, renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    // MongoDB convention: rename id → _id
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain entity convention.
fn document_to_json(mut doc: Document) -> Value {
    // MongoDB convention: rename _id → id
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Generate a fresh store identifier: a 24-character hexadecimal string.
fn new_entity_id() -> String {
    ObjectId::new().to_hex()
}

// ---------------------------------------------------------------------------
// MongoGateway<T>
// ---------------------------------------------------------------------------

/// Generic CRUD gateway over one entity collection.
///
/// Cloning is cheap: the underlying `Database` handle shares the driver's
/// connection pool, established once at startup.
#[derive(Clone, Debug)]
pub struct MongoGateway<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoGateway<T> {
    /// Create a new gateway with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: Entity> MongoGateway<T> {
    /// Get the MongoDB collection for this entity type.
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::collection_name())
    }

    /// Convert a MongoDB document back into a domain entity.
    fn document_to_entity(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize entity from document: {}", e))
    }

    /// Insert a new document built from validated fields.
    ///
    /// Assigns a fresh id and creation/update timestamps, then reads the
    /// document back to return exactly what was stored.
    pub async fn insert(&self, mut fields: Map<String, Value>) -> Result<T> {
        let id = new_entity_id();
        let now = serde_json::to_value(Utc::now())
            .map_err(|e| anyhow!("Failed to serialize timestamp: {}", e))?;
        fields.insert("id".to_string(), Value::String(id.clone()));
        fields.insert("createdAt".to_string(), now.clone());
        fields.insert("updatedAt".to_string(), now);

        let doc = json_to_document(Value::Object(fields))?;
        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create entity: {}", e))?;

        // Read back the inserted entity
        let stored = self
            .collection()
            .find_one(doc! { "_id": &id })
            .await
            .map_err(|e| anyhow!("Failed to read back created entity: {}", e))?
            .ok_or_else(|| anyhow!("Entity not found after insert"))?;

        Self::document_to_entity(stored)
    }

    /// Fetch an entity by id.
    ///
    /// Returns `Ok(None)` if the entity does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to get entity: {}", e))?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    /// Fetch a single entity matching an arbitrary filter.
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(filter)
            .await
            .map_err(|e| anyhow!("Failed to find entity: {}", e))?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    /// List entities, with optional query filter and sort pushed into the
    /// store. Without an explicit sort, newest first.
    pub async fn list(&self, filter: Option<Document>, sort: Option<Document>) -> Result<Vec<T>> {
        let sort = sort.unwrap_or_else(|| doc! { "createdAt": -1 });
        let cursor = self
            .collection()
            .find(filter.unwrap_or_default())
            .sort(sort)
            .await
            .map_err(|e| anyhow!("Failed to list entities: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect entities: {}", e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }

    /// Merge-update an entity: only the supplied fields change, everything
    /// else keeps its prior value. Stamps `updatedAt`.
    ///
    /// Returns the post-update document, or `None` if no document matched.
    pub async fn update(&self, id: &str, mut changes: Map<String, Value>) -> Result<Option<T>> {
        changes.remove("id"); // ids are immutable once assigned
        let now = serde_json::to_value(Utc::now())
            .map_err(|e| anyhow!("Failed to serialize timestamp: {}", e))?;
        changes.insert("updatedAt".to_string(), now);

        let set = json_to_document(Value::Object(changes))?;
        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update entity: {}", e))?;

        match updated {
            Some(d) => Ok(Some(Self::document_to_entity(d)?)),
            None => Ok(None),
        }
    }

    /// Delete an entity by id.
    ///
    /// Returns `true` if a document was removed, `false` if none matched.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to delete entity: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}
