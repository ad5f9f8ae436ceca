//! Environment-driven service configuration

use anyhow::{Context, Result, bail};

use crate::auth::credentials::DEFAULT_COST;
use crate::auth::token::DEFAULT_TTL_SECS;

/// Runtime configuration, read once at startup.
///
/// `JWT_SECRET` has no default; the service refuses to start without it so a
/// misconfigured deployment cannot silently sign tokens with a known key.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Tests pass a map here
    /// instead of mutating the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match get("PORT") {
            Some(raw) => raw.parse().context("PORT must be a port number")?,
            None => 8080,
        };
        let mongodb_uri = get("MONGODB_URI")
            .unwrap_or_else(|| "mongodb://localhost:27017".to_string());
        let database = get("MONGODB_DATABASE").unwrap_or_else(|| "storefront".to_string());
        let Some(jwt_secret) = get("JWT_SECRET").filter(|s| !s.is_empty()) else {
            bail!("JWT_SECRET must be set");
        };
        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => raw.parse().context("BCRYPT_COST must be an integer")?,
            None => DEFAULT_COST,
        };
        let token_ttl_secs = match get("TOKEN_TTL_SECS") {
            Some(raw) => raw.parse().context("TOKEN_TTL_SECS must be an integer")?,
            None => DEFAULT_TTL_SECS,
        };
        Ok(Self {
            port,
            mongodb_uri,
            database,
            jwt_secret,
            bcrypt_cost,
            token_ttl_secs,
        })
    }
}
