//! Declarative payload validation
//!
//! Schemas describe the accepted shape of inbound payloads; validation
//! aggregates every violation and returns the sanitized field map.

pub mod schema;
pub mod validators;

pub use schema::{Constraint, Field, Schema};
pub use validators::is_object_id;
