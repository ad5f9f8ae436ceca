//! Product CRUD and catalogue listing

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use mongodb::bson::{Document, doc};
use regex::Regex;
use serde_json::{Value, json};

use super::validate_entity_id;
use crate::core::{ApiError, ApiResult, Entity, Violation};
use crate::entities::{Product, product};
use crate::server::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let fields = product::schema().validate(&payload)?;
    let stored = state.products.insert(fields).await?;
    tracing::info!(id = %stored.id(), "created product");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Product>>> {
    let (filter, sort) = listing_query(&params)?;
    Ok(Json(state.products.list(filter, sort).await?))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    validate_entity_id(&id)?;
    state
        .products
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            entity: Product::entity_name(),
        })
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Product>> {
    validate_entity_id(&id)?;
    let fields = product::schema().validate(&payload)?;
    state
        .products
        .update(&id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            entity: Product::entity_name(),
        })
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    validate_entity_id(&id)?;
    if !state.products.delete(&id).await? {
        return Err(ApiError::NotFound {
            entity: Product::entity_name(),
        });
    }
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

// Dotted paths are allowed so nested fields like price.original work.
static FIELD_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)*$").expect("valid regex")
});

/// Translate listing query parameters into a store-side filter and sort.
///
/// `?filter=<field>&<field>=<substring>` becomes a case-insensitive substring
/// match on that field; `?sort=<field>&order=asc|desc` becomes an indexed
/// sort. Both run inside the store query, so listing cost does not grow with
/// collection size the way an in-memory scan would.
fn listing_query(
    params: &HashMap<String, String>,
) -> ApiResult<(Option<Document>, Option<Document>)> {
    let mut violations = Vec::new();

    let filter = match params.get("filter") {
        Some(field) if !FIELD_NAME_RE.is_match(field) => {
            violations.push(Violation::new("filter", "must be a valid field name"));
            None
        }
        Some(field) => match params.get(field.as_str()) {
            Some(value) => {
                let mut filter = Document::new();
                filter.insert(
                    field.as_str(),
                    doc! { "$regex": regex::escape(value), "$options": "i" },
                );
                Some(filter)
            }
            None => {
                violations.push(Violation::new(field.clone(), "filter value is missing"));
                None
            }
        },
        None => None,
    };

    let sort = match params.get("sort") {
        Some(field) if !FIELD_NAME_RE.is_match(field) => {
            violations.push(Violation::new("sort", "must be a valid field name"));
            None
        }
        Some(field) => {
            let direction = match params.get("order").map(String::as_str) {
                Some("desc") => -1,
                Some("asc") | None => 1,
                Some(_) => {
                    violations.push(Violation::new("order", "must be 'asc' or 'desc'"));
                    1
                }
            };
            let mut sort = Document::new();
            sort.insert(field.as_str(), direction);
            Some(sort)
        }
        None => None,
    };

    if !violations.is_empty() {
        return Err(violations.into());
    }
    Ok((filter, sort))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_params_means_no_filter_no_sort() {
        let (filter, sort) = listing_query(&params(&[])).unwrap();
        assert!(filter.is_none());
        assert!(sort.is_none());
    }

    #[test]
    fn test_filter_builds_case_insensitive_substring_match() {
        let (filter, _) = listing_query(&params(&[("filter", "title"), ("title", "dune")])).unwrap();
        let filter = filter.unwrap();
        let clause = filter.get_document("title").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), "dune");
        assert_eq!(clause.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_filter_value_is_regex_escaped() {
        let (filter, _) =
            listing_query(&params(&[("filter", "title"), ("title", "c++ (2nd)")])).unwrap();
        let clause = filter.unwrap().get_document("title").unwrap().clone();
        assert_eq!(clause.get_str("$regex").unwrap(), r"c\+\+ \(2nd\)");
    }

    #[test]
    fn test_filter_without_value_param_rejected() {
        let err = listing_query(&params(&[("filter", "title")])).unwrap_err();
        let ApiError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].field, "title");
    }

    #[test]
    fn test_filter_field_name_is_sanitized() {
        let err = listing_query(&params(&[("filter", "$where"), ("$where", "1")])).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_sort_defaults_ascending() {
        let (_, sort) = listing_query(&params(&[("sort", "title")])).unwrap();
        assert_eq!(sort.unwrap().get_i32("title").unwrap(), 1);
    }

    #[test]
    fn test_sort_descending() {
        let (_, sort) =
            listing_query(&params(&[("sort", "rewardPoints"), ("order", "desc")])).unwrap();
        assert_eq!(sort.unwrap().get_i32("rewardPoints").unwrap(), -1);
    }

    #[test]
    fn test_sort_on_nested_field_allowed() {
        let (_, sort) =
            listing_query(&params(&[("sort", "price.original"), ("order", "asc")])).unwrap();
        assert_eq!(sort.unwrap().get_i32("price.original").unwrap(), 1);
    }

    #[test]
    fn test_unknown_order_rejected() {
        let err = listing_query(&params(&[("sort", "title"), ("order", "sideways")])).unwrap_err();
        let ApiError::Validation(violations) = err else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].field, "order");
    }

    #[test]
    fn test_order_without_sort_is_ignored() {
        let (filter, sort) = listing_query(&params(&[("order", "desc")])).unwrap();
        assert!(filter.is_none());
        assert!(sort.is_none());
    }
}
