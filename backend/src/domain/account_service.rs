//! Account domain service.
//!
//! Implements the [`Accounts`] driving port over a [`UserRepository`] and a
//! [`PasswordHasher`]. Input validation happens here so every inbound
//! adapter gets the same policy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountPayload, Accounts, LoginRequest, NewUserRecord, PasswordHasher, ProfilePayload,
    SignUpRequest, UpdatePasswordRequest, UserRepository, UserRepositoryError,
};
use crate::domain::{Email, Error, Role, UserId, UserName, check_password_policy};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail => {
            Error::conflict("email address is already registered")
        }
    }
}

/// Account service implementing the [`Accounts`] driving port.
#[derive(Clone)]
pub struct AccountService<R, H> {
    user_repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new account service with the user repository and hasher.
    pub fn new(user_repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { user_repo, hasher }
    }
}

#[async_trait]
impl<R, H> Accounts for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<AccountPayload, Error> {
        let name = UserName::new(&request.name)
            .map_err(|err| Error::invalid_request(format!("invalid name: {err}")))?;
        let email = Email::new(&request.email)
            .map_err(|err| Error::invalid_request(format!("invalid email: {err}")))?;
        check_password_policy(&request.password)
            .map_err(|err| Error::invalid_request(format!("invalid password: {err}")))?;

        let credential = self.hasher.hash(&request.password).await?;
        let record = NewUserRecord {
            id: UserId::random(),
            name: name.clone(),
            email,
            credential,
            role: Role::User,
        };
        let id = record.id;
        self.user_repo
            .insert_user(record)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %id, "account registered");
        Ok(AccountPayload {
            id,
            name: name.into(),
            role: Role::User,
        })
    }

    async fn login(&self, request: LoginRequest) -> Result<AccountPayload, Error> {
        let email = Email::new(&request.email)
            .map_err(|err| Error::invalid_request(format!("invalid email: {err}")))?;

        // Unknown account and wrong password are indistinguishable to the
        // caller.
        let Some((user, stored)) = self
            .user_repo
            .find_with_credential(&email)
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized("invalid email or password"));
        };

        if !self.hasher.verify(&request.password, &stored).await? {
            return Err(Error::unauthorized("invalid email or password"));
        }

        info!(user_id = %user.id, "login succeeded");
        Ok(AccountPayload {
            id: user.id,
            name: user.name.into(),
            role: user.role,
        })
    }

    async fn profile(&self, user_id: UserId) -> Result<ProfilePayload, Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        Ok(ProfilePayload {
            name: user.name.into(),
            email: user.email.into(),
        })
    }

    async fn rename(&self, user_id: UserId, name: String) -> Result<(), Error> {
        let name = UserName::new(&name)
            .map_err(|err| Error::invalid_request(format!("invalid name: {err}")))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if user.name == name {
            return Err(Error::invalid_request("name is unchanged"));
        }

        let updated = self
            .user_repo
            .update_name(user_id, &name)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found("user not found"));
        }
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: UserId,
        request: UpdatePasswordRequest,
    ) -> Result<(), Error> {
        check_password_policy(&request.new_password)
            .map_err(|err| Error::invalid_request(format!("invalid new password: {err}")))?;

        let stored = self
            .user_repo
            .credential_of(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if !self.hasher.verify(&request.password, &stored).await? {
            return Err(Error::invalid_request("incorrect password"));
        }
        if request.password == request.new_password {
            return Err(Error::invalid_request(
                "new password must differ from the current one",
            ));
        }

        let credential = self.hasher.hash(&request.new_password).await?;
        let updated = self
            .user_repo
            .update_credential(user_id, &credential)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found("user not found"));
        }

        info!(user_id = %user_id, "password updated");
        Ok(())
    }

    async fn promote_to_coach(&self, user_id: UserId) -> Result<(), Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        if user.role == Role::Coach {
            return Err(Error::conflict("user is already a coach"));
        }

        let updated = self
            .user_repo
            .update_role(user_id, Role::Coach)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found("user not found"));
        }

        info!(user_id = %user_id, "coach role granted");
        Ok(())
    }

    async fn role_of(&self, user_id: UserId) -> Result<Role, Error> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        Ok(user.role)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
