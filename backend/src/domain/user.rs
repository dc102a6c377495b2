//! User identity, roles, and profile validation rules.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;

/// Validation errors returned by the profile constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be 2 to 10 letters or digits without spaces or symbols")]
    InvalidName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain a local part and a domain")]
    InvalidEmail,
    #[error("password must be 8 to 16 characters with upper case, lower case, and a digit")]
    WeakPassword,
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Coach,
    Admin,
}

impl Role {
    /// Canonical storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Coach => "COACH",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "COACH" => Ok(Self::Coach),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Letters, digits, or CJK ideographs only; length bounds included.
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[A-Za-z0-9\u{4e00}-\u{9fa5}]{2,10}$").unwrap()
    })
}

/// Display name constrained to the platform's profile rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a display name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = name.as_ref();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if !name_regex().is_match(raw) {
            return Err(UserValidationError::InvalidName);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lowercased email address with minimal structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = email.as_ref().trim();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let (local, domain) = raw.split_once('@').ok_or(UserValidationError::InvalidEmail)?;
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Check a candidate password against the signup policy.
///
/// 8 to 16 characters with at least one upper-case letter, one lower-case
/// letter, and one digit. Hashing and storage happen behind the login port.
pub fn check_password_policy(candidate: &str) -> Result<(), UserValidationError> {
    let len = candidate.chars().count();
    let has_upper = candidate.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = candidate.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = candidate.chars().any(|c| c.is_ascii_digit());
    if (8..=16).contains(&len) && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(UserValidationError::WeakPassword)
    }
}

/// A registered account as seen by the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Zoe", true)]
    #[case("ab", true)]
    #[case("王小明", true)]
    #[case("a", false)]
    #[case("way-too-long-name", false)]
    #[case("with space", false)]
    #[case("", false)]
    fn name_rules_match_profile_policy(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(UserName::new(raw).is_ok(), ok, "name: {raw:?}");
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("USER@Example.COM", true)]
    #[case("no-at-sign", false)]
    #[case("@example.com", false)]
    #[case("user@nodot", false)]
    fn email_rules_require_local_and_domain(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(Email::new(raw).is_ok(), ok, "email: {raw:?}");
    }

    #[rstest]
    fn emails_are_normalised_to_lower_case() {
        let email = Email::new("USER@Example.COM").expect("valid email");
        assert_eq!(email.as_ref(), "user@example.com");
    }

    #[rstest]
    #[case("Passw0rd", true)]
    #[case("Aa1aaaaaaaaaaaaa", true)]
    #[case("short1A", false)]
    #[case("alllowercase1", false)]
    #[case("ALLUPPERCASE1", false)]
    #[case("NoDigitsHere", false)]
    #[case("Aa1aaaaaaaaaaaaaa", false)]
    fn password_policy_enforces_shape(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(check_password_policy(raw).is_ok(), ok, "password: {raw:?}");
    }

    #[rstest]
    fn role_round_trips_through_storage_form() {
        for role in [Role::User, Role::Coach, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }
}
