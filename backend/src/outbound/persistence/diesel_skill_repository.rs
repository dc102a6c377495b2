//! Diesel-backed adapter for the skills catalogue.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Skill;
use crate::domain::ports::{SkillRepository, SkillRepositoryError};

use super::diesel_error_mapping::{is_unique_violation, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSkillRow, SkillRow};
use super::pool::{DbPool, PoolError};
use super::schema::skills;

fn map_pool_error(error: PoolError) -> SkillRepositoryError {
    map_basic_pool_error(error, SkillRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SkillRepositoryError {
    map_basic_diesel_error(
        error,
        SkillRepositoryError::query,
        SkillRepositoryError::connection,
    )
}

/// PostgreSQL adapter for [`SkillRepository`].
#[derive(Clone)]
pub struct DieselSkillRepository {
    pool: DbPool,
}

impl DieselSkillRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SkillRepository for DieselSkillRepository {
    async fn list_skills(&self) -> Result<Vec<Skill>, SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = skills::table
            .order(skills::name.asc())
            .select(SkillRow::as_select())
            .load::<SkillRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| {
                Skill::try_from(row)
                    .map_err(|error| SkillRepositoryError::query(error.to_string()))
            })
            .collect()
    }

    async fn insert_skill(&self, skill: Skill) -> Result<(), SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(skills::table)
            .values(NewSkillRow {
                id: skill.id,
                name: skill.name.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    SkillRepositoryError::DuplicateName
                } else {
                    map_diesel_error(error)
                }
            })?;
        Ok(())
    }

    async fn delete_skill(&self, skill_id: Uuid) -> Result<(), SkillRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(skills::table.find(skill_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if deleted == 0 {
            return Err(SkillRepositoryError::SkillMissing);
        }
        Ok(())
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
        assert_eq!(mapped, SkillRepositoryError::connection("pool exhausted"));
    }

    #[rstest]
    fn unique_violation_becomes_duplicate_name() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("skills_name_key".to_owned()),
        );
        assert!(is_unique_violation(&error));
    }
}
