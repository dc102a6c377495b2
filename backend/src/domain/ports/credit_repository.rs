//! Driven port for credit packages and purchase history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CreditPackage, PurchaseView, UserId};

/// Errors raised by credit repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreditRepositoryError {
    /// Repository connection could not be established.
    #[error("credit repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("credit repository query failed: {message}")]
    Query { message: String },
    /// A package with this name already exists.
    #[error("a credit package with this name already exists")]
    DuplicateName,
    /// No package matched the given id.
    #[error("credit package does not exist")]
    PackageMissing,
}

impl CreditRepositoryError {
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

/// Insert payload for a purchase event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseRecord {
    pub user_id: UserId,
    pub credit_package_id: Uuid,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: DateTime<Utc>,
}

/// Port for package CRUD and purchase writes.
///
/// Purchases are append-only here; only the booking engine mutates the
/// remaining balance of an existing purchase row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// All packages, ordered by name.
    async fn list_packages(&self) -> Result<Vec<CreditPackage>, CreditRepositoryError>;

    /// Persist a new package.
    async fn insert_package(&self, package: CreditPackage)
    -> Result<(), CreditRepositoryError>;

    /// Delete a package by id.
    async fn delete_package(&self, package_id: Uuid) -> Result<(), CreditRepositoryError>;

    /// Find a package by id.
    async fn find_package(
        &self,
        package_id: Uuid,
    ) -> Result<Option<CreditPackage>, CreditRepositoryError>;

    /// Record a purchase event.
    async fn insert_purchase(
        &self,
        record: NewPurchaseRecord,
    ) -> Result<(), CreditRepositoryError>;

    /// The user's purchases joined with package names, newest first.
    async fn list_purchases(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PurchaseView>, CreditRepositoryError>;
}

/// Fixture implementation for tests that do not exercise credit persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCreditRepository;

#[async_trait]
impl CreditRepository for FixtureCreditRepository {
    async fn list_packages(&self) -> Result<Vec<CreditPackage>, CreditRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_package(
        &self,
        _package: CreditPackage,
    ) -> Result<(), CreditRepositoryError> {
        Ok(())
    }

    async fn delete_package(&self, _package_id: Uuid) -> Result<(), CreditRepositoryError> {
        Err(CreditRepositoryError::PackageMissing)
    }

    async fn find_package(
        &self,
        _package_id: Uuid,
    ) -> Result<Option<CreditPackage>, CreditRepositoryError> {
        Ok(None)
    }

    async fn insert_purchase(
        &self,
        _record: NewPurchaseRecord,
    ) -> Result<(), CreditRepositoryError> {
        Ok(())
    }

    async fn list_purchases(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<PurchaseView>, CreditRepositoryError> {
        Ok(Vec::new())
    }
}
