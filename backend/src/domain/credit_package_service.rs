//! Credit package domain service.
//!
//! Implements the [`CreditPackages`] driving port over a
//! [`CreditRepository`]. Purchases recorded here are the only source of new
//! ledger rows; the booking engine only adjusts balances afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    CreatePackageRequest, CreditPackagePayload, CreditPackages, CreditRepository,
    CreditRepositoryError, NewPurchaseRecord, PurchasePayload,
};
use crate::domain::{CreditPackage, Error, UserId};

fn map_repository_error(error: CreditRepositoryError) -> Error {
    match error {
        CreditRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("credit repository unavailable: {message}"))
        }
        CreditRepositoryError::Query { message } => {
            Error::internal(format!("credit repository error: {message}"))
        }
        CreditRepositoryError::DuplicateName => {
            Error::conflict("a credit package with this name already exists")
        }
        CreditRepositoryError::PackageMissing => Error::not_found("credit package not found"),
    }
}

/// Credit package service implementing the [`CreditPackages`] driving port.
#[derive(Clone)]
pub struct CreditPackageService<R> {
    credit_repo: Arc<R>,
}

impl<R> CreditPackageService<R> {
    /// Create a new service with the credit repository.
    pub fn new(credit_repo: Arc<R>) -> Self {
        Self { credit_repo }
    }
}

#[async_trait]
impl<R> CreditPackages for CreditPackageService<R>
where
    R: CreditRepository,
{
    async fn list_packages(&self) -> Result<Vec<CreditPackagePayload>, Error> {
        let packages = self
            .credit_repo
            .list_packages()
            .await
            .map_err(map_repository_error)?;
        Ok(packages.into_iter().map(Into::into).collect())
    }

    async fn create_package(
        &self,
        request: CreatePackageRequest,
    ) -> Result<CreditPackagePayload, Error> {
        let package = CreditPackage::new(
            Uuid::new_v4(),
            request.name,
            request.credit_amount,
            request.price,
        )
        .map_err(|err| Error::invalid_request(format!("invalid credit package: {err}")))?;

        self.credit_repo
            .insert_package(package.clone())
            .await
            .map_err(map_repository_error)?;

        info!(package_id = %package.id, "credit package created");
        Ok(package.into())
    }

    async fn delete_package(&self, package_id: Uuid) -> Result<(), Error> {
        self.credit_repo
            .delete_package(package_id)
            .await
            .map_err(map_repository_error)
    }

    async fn buy_package(&self, user_id: UserId, package_id: Uuid) -> Result<(), Error> {
        let package = self
            .credit_repo
            .find_package(package_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("credit package not found"))?;

        self.credit_repo
            .insert_purchase(NewPurchaseRecord {
                user_id,
                credit_package_id: package.id,
                purchased_credits: package.credit_amount,
                price_paid: package.price,
                purchase_at: Utc::now(),
            })
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user_id, package_id = %package_id, "credit package purchased");
        Ok(())
    }

    async fn purchase_history(&self, user_id: UserId) -> Result<Vec<PurchasePayload>, Error> {
        let purchases = self
            .credit_repo
            .list_purchases(user_id)
            .await
            .map_err(map_repository_error)?;
        Ok(purchases.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "credit_package_service_tests.rs"]
mod tests;
