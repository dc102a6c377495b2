//! Driving port for the skills catalogue.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Skill};

/// Serializable projection of a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillPayload {
    pub id: Uuid,
    pub name: String,
}

impl From<Skill> for SkillPayload {
    fn from(value: Skill) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Request to create a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillRequest {
    pub name: String,
}

/// Driving port for skill operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Skills: Send + Sync {
    /// List all skills.
    async fn list_skills(&self) -> Result<Vec<SkillPayload>, Error>;

    /// Create a new skill.
    async fn create_skill(&self, request: CreateSkillRequest) -> Result<SkillPayload, Error>;

    /// Delete a skill by id.
    async fn delete_skill(&self, skill_id: Uuid) -> Result<(), Error>;
}

/// Fixture implementation for tests that do not exercise skills.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSkills;

#[async_trait]
impl Skills for FixtureSkills {
    async fn list_skills(&self) -> Result<Vec<SkillPayload>, Error> {
        Ok(Vec::new())
    }

    async fn create_skill(&self, request: CreateSkillRequest) -> Result<SkillPayload, Error> {
        Ok(SkillPayload {
            id: Uuid::new_v4(),
            name: request.name,
        })
    }

    async fn delete_skill(&self, _skill_id: Uuid) -> Result<(), Error> {
        Err(Error::not_found("skill not found"))
    }
}
