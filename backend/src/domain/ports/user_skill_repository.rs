//! Driven port for the user-skill registry.

use async_trait::async_trait;

use crate::domain::{DeclarationScope, Error, SkillId, UserId, UserSkill};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registry adapters.
    pub enum UserSkillRepositoryError {
        Connection { message: String } => "skill registry connection failed: {message}",
        Query { message: String } => "skill registry query failed: {message}",
    }
}

impl From<UserSkillRepositoryError> for Error {
    fn from(value: UserSkillRepositoryError) -> Self {
        match value {
            UserSkillRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("skill registry unavailable: {message}"))
            }
            UserSkillRepositoryError::Query { message } => {
                Error::internal(format!("skill registry error: {message}"))
            }
        }
    }
}

/// Storage for per-member skill declarations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSkillRepository: Send + Sync {
    /// Insert `declaration`, replacing whichever stored row collides with it
    /// under `scope`. Returns the stored row.
    async fn upsert(
        &self,
        declaration: UserSkill,
        scope: DeclarationScope,
    ) -> Result<UserSkill, UserSkillRepositoryError>;

    /// Declarations made by `user`, oldest first.
    async fn list_for_user(&self, user: &UserId)
    -> Result<Vec<UserSkill>, UserSkillRepositoryError>;

    /// Teaching declarations for any of `skills`, oldest first.
    async fn list_teachers(
        &self,
        skills: &[SkillId],
    ) -> Result<Vec<UserSkill>, UserSkillRepositoryError>;

    /// Whether `user` currently declares `skill` as teachable.
    async fn teaches(&self, user: &UserId, skill: SkillId)
    -> Result<bool, UserSkillRepositoryError>;
}
