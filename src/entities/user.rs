//! User entity and auth payload schemas

use crate::core::Entity;
use crate::core::validation::{Constraint, Field, Schema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `password_hash` is the bcrypt digest; the plaintext password is never
/// stored, logged, or embedded in resolved responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    fn collection_name() -> &'static str {
        "users"
    }

    fn entity_name() -> &'static str {
        "User"
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Schema for `POST /auth/signup`.
pub fn signup_schema() -> Schema {
    Schema::new(vec![
        Field::required("username", Constraint::string_len(3, 30)),
        Field::required("password", Constraint::min_len_string(6)),
    ])
}

/// Schema for `POST /auth/login`. No length constraints: a malformed login
/// attempt must fail as invalid credentials, not as a validation error that
/// would reveal the registration rules.
pub fn login_schema() -> Schema {
    Schema::new(vec![
        Field::required("username", Constraint::string()),
        Field::required("password", Constraint::string()),
    ])
}
