//! Driving port for declaring skills.

use async_trait::async_trait;

use crate::domain::{Error, ExperienceLevel, Skill, SkillId, SkillRole, UserId, UserSkill};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclareSkillRequest {
    pub skill_id: SkillId,
    pub role: SkillRole,
    pub experience_level: ExperienceLevel,
}

/// A declaration joined with the catalog skill it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredSkill {
    pub declaration: UserSkill,
    pub skill: Skill,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRegistryCommand: Send + Sync {
    async fn declare(
        &self,
        actor: &UserId,
        request: DeclareSkillRequest,
    ) -> Result<DeclaredSkill, Error>;
}
