//! Driven port for account persistence.

use async_trait::async_trait;

use crate::domain::{Email, Role, User, UserId, UserName};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// The email address is already registered.
    #[error("email address is already registered")]
    DuplicateEmail,
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Insert payload for a new account.
///
/// `credential` is the already-processed secret produced by the configured
/// [`PasswordHasher`](super::PasswordHasher); the repository stores it
/// opaquely.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub credential: String,
    pub role: Role,
}

/// One row of the paginated coach listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachListItem {
    pub id: UserId,
    pub name: String,
}

/// Port for reading and writing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account.
    async fn insert_user(&self, record: NewUserRecord) -> Result<(), UserRepositoryError>;

    /// Find an account by id.
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find an account and its stored credential by email.
    async fn find_with_credential(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, UserRepositoryError>;

    /// Rename an account. Returns `false` when no row matched.
    async fn update_name(
        &self,
        user_id: UserId,
        name: &UserName,
    ) -> Result<bool, UserRepositoryError>;

    /// Fetch the stored credential for an account.
    async fn credential_of(
        &self,
        user_id: UserId,
    ) -> Result<Option<String>, UserRepositoryError>;

    /// Replace the stored credential. Returns `false` when no row matched.
    async fn update_credential(
        &self,
        user_id: UserId,
        credential: &str,
    ) -> Result<bool, UserRepositoryError>;

    /// Change an account's role. Returns `false` when no row matched.
    async fn update_role(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<bool, UserRepositoryError>;

    /// Page through accounts with the coach role, ordered by name.
    async fn list_coaches(
        &self,
        page: i64,
        per: i64,
    ) -> Result<Vec<CoachListItem>, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise account persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert_user(&self, _record: NewUserRecord) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _user_id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_with_credential(
        &self,
        _email: &Email,
    ) -> Result<Option<(User, String)>, UserRepositoryError> {
        Ok(None)
    }

    async fn update_name(
        &self,
        _user_id: UserId,
        _name: &UserName,
    ) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }

    async fn credential_of(
        &self,
        _user_id: UserId,
    ) -> Result<Option<String>, UserRepositoryError> {
        Ok(None)
    }

    async fn update_credential(
        &self,
        _user_id: UserId,
        _credential: &str,
    ) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }

    async fn update_role(
        &self,
        _user_id: UserId,
        _role: Role,
    ) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }

    async fn list_coaches(
        &self,
        _page: i64,
        _per: i64,
    ) -> Result<Vec<CoachListItem>, UserRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_return_empty() {
        let repo = FixtureUserRepository;
        let email = Email::new("someone@example.com").expect("valid email");
        assert_eq!(repo.find_by_id(UserId::random()).await, Ok(None));
        assert_eq!(repo.find_with_credential(&email).await, Ok(None));
        assert_eq!(repo.credential_of(UserId::random()).await, Ok(None));
        assert_eq!(repo.list_coaches(1, 5).await, Ok(Vec::new()));
    }

    #[rstest]
    fn duplicate_email_has_stable_message() {
        assert_eq!(
            UserRepositoryError::DuplicateEmail.to_string(),
            "email address is already registered"
        );
    }
}
