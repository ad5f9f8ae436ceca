//! Authentication subsystem: credential hashing and token issuance

pub mod credentials;
pub mod token;

pub use credentials::CredentialManager;
pub use token::{Claims, TokenIssuer};
