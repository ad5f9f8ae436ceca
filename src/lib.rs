//! Storefront API: a MongoDB-backed commerce backend
//!
//! The crate is organised in layers:
//!
//! - [`core`]: the `Entity` trait, the API error type, and the declarative
//!   payload validation engine
//! - [`entities`]: the persisted document types (users, products, carts,
//!   orders) and their schemas
//! - [`storage`]: the generic MongoDB gateway used by every entity
//! - [`auth`]: password hashing and bearer token issuance
//! - [`resolver`]: reference expansion for read endpoints
//! - [`server`]: axum router, shared state, and request handlers
//! - [`config`]: environment-driven startup configuration

pub mod auth;
pub mod config;
pub mod core;
pub mod entities;
pub mod resolver;
pub mod server;
pub mod storage;

pub use config::AppConfig;
pub use core::{ApiError, ApiResult};
pub use server::{AppState, build_router};
