//! Per-member skill declarations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SkillId, UserId};

/// Whether a member offers to teach a skill or wants to learn it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillRole {
    Teaches,
    Learns,
}

impl SkillRole {
    /// Map the `can_teach` flag used by clients.
    pub fn from_can_teach(can_teach: bool) -> Self {
        if can_teach { Self::Teaches } else { Self::Learns }
    }

    pub fn can_teach(self) -> bool {
        matches!(self, Self::Teaches)
    }
}

/// Self-reported experience, ordered `Beginner < Intermediate < Advanced`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ExperienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when an experience level label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown experience level '{0}'; expected Beginner, Intermediate or Advanced")]
pub struct ParseExperienceLevelError(pub String);

impl FromStr for ExperienceLevel {
    type Err = ParseExperienceLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(ParseExperienceLevelError(s.to_owned())),
        }
    }
}

/// Uniqueness key applied when a member declares a skill again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeclarationScope {
    /// One declaration per `(user, skill, role)`; teaching and learning the
    /// same skill coexist.
    #[default]
    SkillAndRole,
    /// One declaration per `(user, skill)`; re-declaring replaces the role.
    Skill,
}

impl DeclarationScope {
    /// Whether `existing` occupies the slot that `candidate` would fill.
    pub fn collides(self, existing: &UserSkill, candidate: &UserSkill) -> bool {
        let same_skill =
            existing.user_id() == candidate.user_id() && existing.skill_id() == candidate.skill_id();
        match self {
            Self::SkillAndRole => same_skill && existing.role() == candidate.role(),
            Self::Skill => same_skill,
        }
    }
}

/// Raised when a declaration scope label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown declaration scope '{0}'; expected skill_and_role or skill")]
pub struct ParseDeclarationScopeError(pub String);

impl FromStr for DeclarationScope {
    type Err = ParseDeclarationScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skill_and_role" => Ok(Self::SkillAndRole),
            "skill" => Ok(Self::Skill),
            other => Err(ParseDeclarationScopeError(other.to_owned())),
        }
    }
}

/// A member's declaration of a skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSkill {
    user_id: UserId,
    skill_id: SkillId,
    role: SkillRole,
    experience_level: ExperienceLevel,
    declared_at: DateTime<Utc>,
}

impl UserSkill {
    pub fn new(
        user_id: UserId,
        skill_id: SkillId,
        role: SkillRole,
        experience_level: ExperienceLevel,
        declared_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            skill_id,
            role,
            experience_level,
            declared_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    pub fn role(&self) -> SkillRole {
        self.role
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    pub fn declared_at(&self) -> DateTime<Utc> {
        self.declared_at
    }

    pub fn is_teaching(&self) -> bool {
        self.role.can_teach()
    }
}
