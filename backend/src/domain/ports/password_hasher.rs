//! Driven port for credential processing.
//!
//! Hash algorithm choice is a deployment concern, not a domain one: the
//! account service only needs to derive a storable credential and verify a
//! candidate against it. Production wiring plugs a real hasher in here.

use async_trait::async_trait;

use crate::domain::Error;

/// Port for deriving and verifying stored credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive the storable form of a password.
    async fn hash(&self, password: &str) -> Result<String, Error>;

    /// Verify a candidate password against a stored credential.
    async fn verify(&self, password: &str, stored: &str) -> Result<bool, Error>;
}

/// Development-only hasher that stores credentials verbatim.
///
/// Must never be wired in production deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

#[async_trait]
impl PasswordHasher for PlaintextPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, Error> {
        Ok(password.to_owned())
    }

    async fn verify(&self, password: &str, stored: &str) -> Result<bool, Error> {
        Ok(password == stored)
    }
}
