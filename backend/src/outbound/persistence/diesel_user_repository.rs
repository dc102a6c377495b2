//! Diesel-backed adapter for account persistence.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    CoachListItem, NewUserRecord, UserRepository, UserRepositoryError,
};
use crate::domain::{Email, Role, User, UserId, UserName};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn map_row(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row).map_err(|error| UserRepositoryError::query(error.to_string()))
}

/// PostgreSQL adapter for [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_user(&self, record: NewUserRecord) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow {
                id: Uuid::from(record.id),
                name: record.name.as_ref(),
                email: record.email.as_ref(),
                credential: record.credential.as_str(),
                role: record.role.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    UserRepositoryError::DuplicateEmail
                } else {
                    map_diesel_error(error)
                }
            })?;
        Ok(())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(Uuid::from(user_id))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(map_row).transpose()
    }

    async fn find_with_credential(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| {
            let credential = row.credential.clone();
            map_row(row).map(|user| (user, credential))
        })
        .transpose()
    }

    async fn update_name(
        &self,
        user_id: UserId,
        name: &UserName,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(Uuid::from(user_id)))
            .set(users::name.eq(name.as_ref()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn credential_of(
        &self,
        user_id: UserId,
    ) -> Result<Option<String>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(Uuid::from(user_id))
            .select(users::credential)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn update_credential(
        &self,
        user_id: UserId,
        credential: &str,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(Uuid::from(user_id)))
            .set(users::credential.eq(credential))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn update_role(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.find(Uuid::from(user_id)))
            .set(users::role.eq(role.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn list_coaches(
        &self,
        page: i64,
        per: i64,
    ) -> Result<Vec<CoachListItem>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = users::table
            .filter(users::role.eq(Role::Coach.as_str()))
            .order(users::name.asc())
            .limit(per)
            .offset((page - 1) * per)
            .select((users::id, users::name))
            .load::<(Uuid, String)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| CoachListItem {
                id: UserId::from_uuid(id),
                name,
            })
            .collect())
    }
}
