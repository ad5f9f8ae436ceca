//! Core abstractions: entity trait, error taxonomy, payload validation

pub mod entity;
pub mod error;
pub mod validation;

pub use entity::Entity;
pub use error::{ApiError, ApiResult, Violation};
