//! Cart CRUD
//!
//! Reads resolve `userId` and item `productId` references into embedded
//! documents. Updates replace the whole cart document, so the payload is
//! validated in full.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};

use super::validate_entity_id;
use crate::core::{ApiError, ApiResult, Entity};
use crate::entities::{Cart, cart};
use crate::server::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Cart>)> {
    let fields = cart::schema().validate(&payload)?;
    let stored = state.carts.insert(fields).await?;
    tracing::info!(id = %stored.id(), "created cart");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let resolver = state.resolver();
    let mut resolved = Vec::new();
    for cart in state.carts.list(None, None).await? {
        resolved.push(resolver.resolve_cart(&cart).await?);
    }
    Ok(Json(resolved))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    validate_entity_id(&id)?;
    let Some(cart) = state.carts.get(&id).await? else {
        return Err(ApiError::NotFound {
            entity: Cart::entity_name(),
        });
    };
    Ok(Json(state.resolver().resolve_cart(&cart).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Cart>> {
    validate_entity_id(&id)?;
    let fields = cart::schema().validate(&payload)?;
    state
        .carts
        .update(&id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            entity: Cart::entity_name(),
        })
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    validate_entity_id(&id)?;
    if !state.carts.delete(&id).await? {
        return Err(ApiError::NotFound {
            entity: Cart::entity_name(),
        });
    }
    Ok(Json(json!({ "message": "Cart deleted successfully" })))
}
