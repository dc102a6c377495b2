//! Diesel-backed adapter for credit packages and purchase history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CreditRepository, CreditRepositoryError, NewPurchaseRecord};
use crate::domain::{CreditPackage, PurchaseView, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{CreditPackageRow, NewCreditPackageRow, NewCreditPurchaseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{credit_packages, credit_purchases};

fn map_pool_error(error: PoolError) -> CreditRepositoryError {
    map_basic_pool_error(error, CreditRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CreditRepositoryError {
    map_basic_diesel_error(
        error,
        CreditRepositoryError::query,
        CreditRepositoryError::connection,
    )
}

fn map_package_row(row: CreditPackageRow) -> Result<CreditPackage, CreditRepositoryError> {
    CreditPackage::try_from(row).map_err(|error| CreditRepositoryError::query(error.to_string()))
}

/// PostgreSQL adapter for [`CreditRepository`].
#[derive(Clone)]
pub struct DieselCreditRepository {
    pool: DbPool,
}

impl DieselCreditRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for DieselCreditRepository {
    async fn list_packages(&self) -> Result<Vec<CreditPackage>, CreditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = credit_packages::table
            .order(credit_packages::name.asc())
            .select(CreditPackageRow::as_select())
            .load::<CreditPackageRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(map_package_row).collect()
    }

    async fn insert_package(
        &self,
        package: CreditPackage,
    ) -> Result<(), CreditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(credit_packages::table)
            .values(NewCreditPackageRow {
                id: package.id,
                name: package.name.as_str(),
                credit_amount: package.credit_amount,
                price: package.price,
            })
            .execute(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    CreditRepositoryError::DuplicateName
                } else {
                    map_diesel_error(error)
                }
            })?;
        Ok(())
    }

    async fn delete_package(&self, package_id: Uuid) -> Result<(), CreditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(credit_packages::table.find(package_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(CreditRepositoryError::PackageMissing);
        }
        Ok(())
    }

    async fn find_package(
        &self,
        package_id: Uuid,
    ) -> Result<Option<CreditPackage>, CreditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = credit_packages::table
            .find(package_id)
            .select(CreditPackageRow::as_select())
            .first::<CreditPackageRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(map_package_row).transpose()
    }

    async fn insert_purchase(
        &self,
        record: NewPurchaseRecord,
    ) -> Result<(), CreditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(credit_purchases::table)
            .values(NewCreditPurchaseRow {
                id: Uuid::new_v4(),
                user_id: Uuid::from(record.user_id),
                credit_package_id: record.credit_package_id,
                purchased_credits: record.purchased_credits,
                price_paid: record.price_paid,
                purchase_at: record.purchase_at,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_purchases(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PurchaseView>, CreditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = credit_purchases::table
            .inner_join(credit_packages::table)
            .filter(credit_purchases::user_id.eq(Uuid::from(user_id)))
            .order(credit_purchases::purchase_at.desc())
            .select((
                credit_packages::name,
                credit_purchases::purchased_credits,
                credit_purchases::price_paid,
                credit_purchases::purchase_at,
            ))
            .load::<(String, i32, i32, DateTime<Utc>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(
                |(package_name, purchased_credits, price_paid, purchase_at)| PurchaseView {
                    package_name,
                    purchased_credits,
                    price_paid,
                    purchase_at,
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("pool exhausted"));
        assert_eq!(mapped, CreditRepositoryError::connection("pool exhausted"));
    }

    #[rstest]
    fn corrupt_package_rows_surface_as_query_errors() {
        let row = CreditPackageRow {
            id: Uuid::new_v4(),
            name: "Starter".to_owned(),
            credit_amount: 0,
            price: 900,
            created_at: Utc::now(),
        };
        assert!(matches!(
            map_package_row(row),
            Err(CreditRepositoryError::Query { .. })
        ));
    }
}
