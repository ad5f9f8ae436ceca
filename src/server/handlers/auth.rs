//! Signup and login

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use mongodb::bson::doc;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::core::{ApiError, ApiResult, Entity};
use crate::entities::user;
use crate::server::AppState;

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    let fields = user::signup_schema().validate(&payload)?;
    let creds: Credentials = serde_json::from_value(Value::Object(fields))?;

    if state
        .users
        .find_one(doc! { "username": &creds.username })
        .await?
        .is_some()
    {
        return Err(ApiError::Duplicate {
            message: "User already exists".to_string(),
        });
    }

    let hash = state.credentials.hash(&creds.password)?;
    let mut stored = Map::new();
    stored.insert("username".to_string(), json!(creds.username));
    stored.insert("passwordHash".to_string(), json!(hash));
    let account = state.users.insert(stored).await?;
    tracing::info!(id = %account.id(), "registered user");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Unknown username and wrong password produce byte-identical failures, so
/// the endpoint cannot be used to probe which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let fields = user::login_schema().validate(&payload)?;
    let creds: Credentials = serde_json::from_value(Value::Object(fields))?;

    let Some(account) = state
        .users
        .find_one(doc! { "username": &creds.username })
        .await?
    else {
        return Err(ApiError::Auth);
    };
    if !state
        .credentials
        .verify(&creds.password, &account.password_hash)?
    {
        return Err(ApiError::Auth);
    }

    let token = state.tokens.issue(&account.id)?;
    Ok(Json(json!({
        "token": token,
        "message": "Login successful",
    })))
}
