//! One-way password hashing and verification

use crate::core::{ApiError, ApiResult};

/// Default bcrypt work factor.
pub const DEFAULT_COST: u32 = 10;

/// Hashes and verifies passwords with bcrypt.
///
/// The work factor is fixed at construction (from config). Only the salted
/// hash ever leaves this type; plaintext is neither stored nor logged.
#[derive(Clone, Debug)]
pub struct CredentialManager {
    cost: u32,
}

impl CredentialManager {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Derive a salted one-way hash of a password.
    pub fn hash(&self, password: &str) -> ApiResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
    }

    /// Check a password against a stored hash.
    pub fn verify(&self, password: &str, hash: &str) -> ApiResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| ApiError::Internal(format!("password verification failed: {}", e)))
    }
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost, to keep the test suite fast.
    fn manager() -> CredentialManager {
        CredentialManager::new(4)
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let m = manager();
        let hash = m.hash("secret123").expect("hashing succeeds");
        assert!(m.verify("secret123", &hash).expect("verification runs"));
    }

    #[test]
    fn test_wrong_password_does_not_verify() {
        let m = manager();
        let hash = m.hash("secret123").expect("hashing succeeds");
        assert!(!m.verify("secret124", &hash).expect("verification runs"));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let m = manager();
        let hash = m.hash("secret123").expect("hashing succeeds");
        assert!(!hash.contains("secret123"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let m = manager();
        let a = m.hash("secret123").expect("hashing succeeds");
        let b = m.hash("secret123").expect("hashing succeeds");
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_internal_error() {
        let m = manager();
        let err = m.verify("secret123", "not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
