//! Request handlers, one module per resource

pub mod auth;
pub mod carts;
pub mod orders;
pub mod products;

use crate::core::validation::is_object_id;
use crate::core::{ApiResult, Violation};

/// Reject malformed path ids before touching the store. A well-formed id
/// that matches nothing is a 404; a malformed one is a validation error.
fn validate_entity_id(id: &str) -> ApiResult<()> {
    if !is_object_id(id) {
        return Err(vec![Violation::new(
            "id",
            "must be a 24-character hexadecimal id",
        )]
        .into());
    }
    Ok(())
}
