//! Skill catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    CreateSkillRequest, SkillPayload, SkillRepository, SkillRepositoryError, Skills,
};
use crate::domain::{Error, Skill};

fn map_repository_error(error: SkillRepositoryError) -> Error {
    match error {
        SkillRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("skill repository unavailable: {message}"))
        }
        SkillRepositoryError::Query { message } => {
            Error::internal(format!("skill repository error: {message}"))
        }
        SkillRepositoryError::DuplicateName => {
            Error::conflict("a skill with this name already exists")
        }
        SkillRepositoryError::SkillMissing => Error::not_found("skill not found"),
    }
}

/// Skill service implementing the [`Skills`] driving port.
#[derive(Clone)]
pub struct SkillService<R> {
    skill_repo: Arc<R>,
}

impl<R> SkillService<R> {
    /// Create a new skill service with the skill repository.
    pub fn new(skill_repo: Arc<R>) -> Self {
        Self { skill_repo }
    }
}

#[async_trait]
impl<R> Skills for SkillService<R>
where
    R: SkillRepository,
{
    async fn list_skills(&self) -> Result<Vec<SkillPayload>, Error> {
        let skills = self
            .skill_repo
            .list_skills()
            .await
            .map_err(map_repository_error)?;
        Ok(skills.into_iter().map(Into::into).collect())
    }

    async fn create_skill(&self, request: CreateSkillRequest) -> Result<SkillPayload, Error> {
        let skill = Skill::new(Uuid::new_v4(), request.name)
            .map_err(|err| Error::invalid_request(format!("invalid skill: {err}")))?;

        self.skill_repo
            .insert_skill(skill.clone())
            .await
            .map_err(map_repository_error)?;
        Ok(skill.into())
    }

    async fn delete_skill(&self, skill_id: Uuid) -> Result<(), Error> {
        self.skill_repo
            .delete_skill(skill_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockSkillRepository;

    #[tokio::test]
    async fn create_skill_maps_duplicate_name_to_conflict() {
        let mut repo = MockSkillRepository::new();
        repo.expect_insert_skill()
            .times(1)
            .return_once(|_| Err(SkillRepositoryError::DuplicateName));

        let service = SkillService::new(Arc::new(repo));
        let error = service
            .create_skill(CreateSkillRequest {
                name: "Yoga".to_owned(),
            })
            .await
            .expect_err("duplicate name");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn create_skill_rejects_blank_name_before_persisting() {
        let mut repo = MockSkillRepository::new();
        repo.expect_insert_skill().times(0);

        let service = SkillService::new(Arc::new(repo));
        let error = service
            .create_skill(CreateSkillRequest {
                name: "  ".to_owned(),
            })
            .await
            .expect_err("blank name");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn delete_skill_maps_missing_skill_to_not_found() {
        let mut repo = MockSkillRepository::new();
        repo.expect_delete_skill()
            .times(1)
            .return_once(|_| Err(SkillRepositoryError::SkillMissing));

        let service = SkillService::new(Arc::new(repo));
        let error = service
            .delete_skill(Uuid::new_v4())
            .await
            .expect_err("missing skill");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
