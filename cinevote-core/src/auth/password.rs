use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordVerifier, SaltString},
};
use rand::{TryRngCore, rngs::OsRng};

use crate::error::{CoreError, Result};

const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

/// Argon2id hashing of account passwords into PHC strings.
///
/// Both operations are CPU bound and run on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| CoreError::internal(format!("password hashing task failed: {e}")))?
    }

    /// Returns `false` for a wrong password and for a stored hash that does
    /// not parse.
    pub async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
            .await
            .map_err(|e| CoreError::internal(format!("password verification task failed: {e}")))
    }
}

fn hash_blocking(password: &str) -> Result<String> {
    use argon2::password_hash::PasswordHasher as _;

    let mut salt_bytes = [0u8; SALT_LENGTH];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| CoreError::internal(format!("failed to generate salt: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| CoreError::internal(format!("failed to encode salt: {e}")))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CoreError::internal(format!("failed to hash password: {e}")))
}

fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
