//! bcrypt-backed [`PasswordHasher`].
//!
//! Hashing is CPU bound, so both operations run on the blocking thread pool.
//! The plaintext copy handed to that thread is zeroised on drop.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Password hasher using bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher with an explicit cost. bcrypt accepts 4 to 31.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

fn backend_error(err: impl std::fmt::Display) -> PasswordHashError {
    PasswordHashError::backend(err.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(backend_error)?
            .map_err(backend_error)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
            .await
            .map_err(backend_error)?
            .map_err(backend_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify_accepts_original_password() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let hash = hasher.hash("password123").await.expect("hash");

        assert_ne!(hash, "password123");
        assert!(hasher.verify("password123", &hash).await.expect("verify"));
        assert!(!hasher.verify("password124", &hash).await.expect("verify"));
    }

    #[tokio::test]
    async fn malformed_hash_is_backend_error() {
        let hasher = BcryptPasswordHasher::with_cost(TEST_COST);
        let err = hasher
            .verify("password123", "not-a-bcrypt-hash")
            .await
            .expect_err("malformed hash");
        assert!(matches!(err, PasswordHashError::Backend { .. }));
    }

    #[tokio::test]
    async fn invalid_cost_is_backend_error() {
        let hasher = BcryptPasswordHasher::with_cost(1);
        let err = hasher.hash("password123").await.expect_err("cost too low");
        assert!(matches!(err, PasswordHashError::Backend { .. }));
    }
}
