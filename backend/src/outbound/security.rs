//! Credential hashing adapter.

use async_trait::async_trait;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::Error;
use crate::domain::ports::PasswordHasher;

const SALT_LEN: usize = 16;

/// Salted SHA-256 hasher storing credentials as `hex(salt)$hex(digest)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

fn digest_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl PasswordHasher for Sha256PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, Error> {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Ok(format!(
            "{}${}",
            hex::encode(salt),
            digest_with_salt(&salt, password)
        ))
    }

    async fn verify(&self, password: &str, stored: &str) -> Result<bool, Error> {
        let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
            return Ok(false);
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return Ok(false);
        };
        Ok(digest_with_salt(&salt, password) == digest_hex)
    }
}
