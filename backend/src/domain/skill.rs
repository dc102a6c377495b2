//! Coaching skills catalogue.

use uuid::Uuid;

/// Validation errors for skills.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillValidationError {
    #[error("skill name must not be empty")]
    EmptyName,
}

/// A named coaching skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

impl Skill {
    /// Creates a validated skill.
    pub fn new(id: Uuid, name: impl Into<String>) -> Result<Self, SkillValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SkillValidationError::EmptyName);
        }
        Ok(Self { id, name })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            Skill::new(Uuid::new_v4(), "  "),
            Err(SkillValidationError::EmptyName)
        );
    }
}
