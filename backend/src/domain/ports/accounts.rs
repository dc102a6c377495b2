//! Driving port for account use-cases.
//!
//! Inbound adapters call this port to register, authenticate, and manage
//! profiles without knowing the backing infrastructure, which keeps handler
//! tests deterministic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Role, UserId};

/// Request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to authenticate with email and password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to replace the account password.
///
/// The inbound adapter has already checked that the confirmation field
/// matched; only the old and new secrets reach the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub password: String,
    pub new_password: String,
}

/// Public identity of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// Profile details returned to the account owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: String,
    pub email: String,
}

/// Domain use-case port for account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new `USER`-role account.
    async fn sign_up(&self, request: SignUpRequest) -> Result<AccountPayload, Error>;

    /// Validate credentials and return the authenticated account.
    async fn login(&self, request: LoginRequest) -> Result<AccountPayload, Error>;

    /// Fetch the caller's profile.
    async fn profile(&self, user_id: UserId) -> Result<ProfilePayload, Error>;

    /// Rename the caller's account.
    async fn rename(&self, user_id: UserId, name: String) -> Result<(), Error>;

    /// Replace the caller's password after verifying the current one.
    async fn update_password(
        &self,
        user_id: UserId,
        request: UpdatePasswordRequest,
    ) -> Result<(), Error>;

    /// Grant the coach role to an existing account.
    async fn promote_to_coach(&self, user_id: UserId) -> Result<(), Error>;

    /// Resolve the caller's role for authorisation gates.
    async fn role_of(&self, user_id: UserId) -> Result<Role, Error>;
}

/// Fixture implementation for tests that do not exercise accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccounts;

#[async_trait]
impl Accounts for FixtureAccounts {
    async fn sign_up(&self, request: SignUpRequest) -> Result<AccountPayload, Error> {
        Ok(AccountPayload {
            id: UserId::random(),
            name: request.name,
            role: Role::User,
        })
    }

    async fn login(&self, _request: LoginRequest) -> Result<AccountPayload, Error> {
        Err(Error::unauthorized("invalid credentials"))
    }

    async fn profile(&self, _user_id: UserId) -> Result<ProfilePayload, Error> {
        Err(Error::not_found("user not found"))
    }

    async fn rename(&self, _user_id: UserId, _name: String) -> Result<(), Error> {
        Ok(())
    }

    async fn update_password(
        &self,
        _user_id: UserId,
        _request: UpdatePasswordRequest,
    ) -> Result<(), Error> {
        Ok(())
    }

    async fn promote_to_coach(&self, _user_id: UserId) -> Result<(), Error> {
        Ok(())
    }

    async fn role_of(&self, _user_id: UserId) -> Result<Role, Error> {
        Ok(Role::User)
    }
}
