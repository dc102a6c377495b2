//! Driving port for credit package management and purchases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{CreditPackage, Error, PurchaseView, UserId};

/// Serializable projection of a credit package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditPackagePayload {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i32,
    pub price: i32,
}

impl From<CreditPackage> for CreditPackagePayload {
    fn from(value: CreditPackage) -> Self {
        Self {
            id: value.id,
            name: value.name,
            credit_amount: value.credit_amount,
            price: value.price,
        }
    }
}

/// Request to create a credit package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageRequest {
    pub name: String,
    pub credit_amount: i32,
    pub price: i32,
}

/// One row of a user's purchase history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePayload {
    pub package_name: String,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: DateTime<Utc>,
}

impl From<PurchaseView> for PurchasePayload {
    fn from(value: PurchaseView) -> Self {
        Self {
            package_name: value.package_name,
            purchased_credits: value.purchased_credits,
            price_paid: value.price_paid,
            purchase_at: value.purchase_at,
        }
    }
}

/// Driving port for credit package operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreditPackages: Send + Sync {
    /// List all packages.
    async fn list_packages(&self) -> Result<Vec<CreditPackagePayload>, Error>;

    /// Create a new package.
    async fn create_package(
        &self,
        request: CreatePackageRequest,
    ) -> Result<CreditPackagePayload, Error>;

    /// Delete a package by id.
    async fn delete_package(&self, package_id: Uuid) -> Result<(), Error>;

    /// Record a purchase of the package by the user.
    async fn buy_package(&self, user_id: UserId, package_id: Uuid) -> Result<(), Error>;

    /// The user's purchase history, newest first.
    async fn purchase_history(&self, user_id: UserId) -> Result<Vec<PurchasePayload>, Error>;
}

/// Fixture implementation for tests that do not exercise packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCreditPackages;

#[async_trait]
impl CreditPackages for FixtureCreditPackages {
    async fn list_packages(&self) -> Result<Vec<CreditPackagePayload>, Error> {
        Ok(Vec::new())
    }

    async fn create_package(
        &self,
        request: CreatePackageRequest,
    ) -> Result<CreditPackagePayload, Error> {
        Ok(CreditPackagePayload {
            id: Uuid::new_v4(),
            name: request.name,
            credit_amount: request.credit_amount,
            price: request.price,
        })
    }

    async fn delete_package(&self, _package_id: Uuid) -> Result<(), Error> {
        Err(Error::not_found("credit package not found"))
    }

    async fn buy_package(&self, _user_id: UserId, _package_id: Uuid) -> Result<(), Error> {
        Err(Error::not_found("credit package not found"))
    }

    async fn purchase_history(&self, _user_id: UserId) -> Result<Vec<PurchasePayload>, Error> {
        Ok(Vec::new())
    }
}
