//! Driven port for the skills catalogue.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Skill;

/// Errors raised by skill repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillRepositoryError {
    /// Repository connection could not be established.
    #[error("skill repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("skill repository query failed: {message}")]
    Query { message: String },
    /// A skill with this name already exists.
    #[error("a skill with this name already exists")]
    DuplicateName,
    /// No skill matched the given id.
    #[error("skill does not exist")]
    SkillMissing,
}

impl SkillRepositoryError {
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

/// Port for skill persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// All skills, ordered by name.
    async fn list_skills(&self) -> Result<Vec<Skill>, SkillRepositoryError>;

    /// Persist a new skill.
    async fn insert_skill(&self, skill: Skill) -> Result<(), SkillRepositoryError>;

    /// Delete a skill by id.
    async fn delete_skill(&self, skill_id: Uuid) -> Result<(), SkillRepositoryError>;
}

/// Fixture implementation for tests that do not exercise skill persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSkillRepository;

#[async_trait]
impl SkillRepository for FixtureSkillRepository {
    async fn list_skills(&self) -> Result<Vec<Skill>, SkillRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_skill(&self, _skill: Skill) -> Result<(), SkillRepositoryError> {
        Ok(())
    }

    async fn delete_skill(&self, _skill_id: Uuid) -> Result<(), SkillRepositoryError> {
        Err(SkillRepositoryError::SkillMissing)
    }
}
