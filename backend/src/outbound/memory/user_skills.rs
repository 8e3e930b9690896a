//! In-memory user-skill registry.

use std::sync::RwLock;

use async_trait::async_trait;

use super::POISONED;
use crate::domain::ports::{UserSkillRepository, UserSkillRepositoryError};
use crate::domain::{DeclarationScope, SkillId, UserId, UserSkill};

#[derive(Debug, Default)]
pub struct InMemoryUserSkillRepository {
    /// Kept in declaration order.
    rows: RwLock<Vec<UserSkill>>,
}

impl InMemoryUserSkillRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, Vec<UserSkill>>, UserSkillRepositoryError> {
        self.rows
            .read()
            .map_err(|_| UserSkillRepositoryError::query(POISONED))
    }
}

#[async_trait]
impl UserSkillRepository for InMemoryUserSkillRepository {
    async fn upsert(
        &self,
        declaration: UserSkill,
        scope: DeclarationScope,
    ) -> Result<UserSkill, UserSkillRepositoryError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| UserSkillRepositoryError::query(POISONED))?;
        rows.retain(|existing| !scope.collides(existing, &declaration));
        rows.push(declaration.clone());
        Ok(declaration)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserSkill>, UserSkillRepositoryError> {
        Ok(self
            .read()?
            .iter()
            .filter(|row| row.user_id() == user)
            .cloned()
            .collect())
    }

    async fn list_teachers(
        &self,
        skills: &[SkillId],
    ) -> Result<Vec<UserSkill>, UserSkillRepositoryError> {
        Ok(self
            .read()?
            .iter()
            .filter(|row| row.is_teaching() && skills.contains(&row.skill_id()))
            .cloned()
            .collect())
    }

    async fn teaches(
        &self,
        user: &UserId,
        skill: SkillId,
    ) -> Result<bool, UserSkillRepositoryError> {
        Ok(self
            .read()?
            .iter()
            .any(|row| row.is_teaching() && row.user_id() == user && row.skill_id() == skill))
    }
}
