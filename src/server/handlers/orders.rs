//! Order CRUD
//!
//! Reads come back with the `user` and line `product` references resolved
//! into embedded documents. Updates accept a partial payload, so a status
//! transition is a one-field request.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

use super::validate_entity_id;
use crate::core::{ApiError, ApiResult, Entity};
use crate::entities::{Order, order};
use crate::server::AppState;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let fields = order::schema().validate(&payload)?;
    let stored = state.orders.insert(fields).await?;
    tracing::info!(id = %stored.id(), "created order");
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let resolver = state.resolver();
    let mut resolved = Vec::new();
    for order in state.orders.list(None, None).await? {
        resolved.push(resolver.resolve_order(&order).await?);
    }
    Ok(Json(resolved))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    validate_entity_id(&id)?;
    let Some(order) = state.orders.get(&id).await? else {
        return Err(ApiError::NotFound {
            entity: Order::entity_name(),
        });
    };
    Ok(Json(state.resolver().resolve_order(&order).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Order>> {
    validate_entity_id(&id)?;
    let fields = order::schema().validate_partial(&payload)?;
    state
        .orders
        .update(&id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            entity: Order::entity_name(),
        })
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    validate_entity_id(&id)?;
    if !state.orders.delete(&id).await? {
        return Err(ApiError::NotFound {
            entity: Order::entity_name(),
        });
    }
    Ok(StatusCode::NO_CONTENT)
}
