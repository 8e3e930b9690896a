//! In-memory catalog of categories and skills.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::POISONED;
use crate::domain::ports::{CatalogRepository, CatalogRepositoryError};
use crate::domain::{Category, CategoryId, Skill, SkillFilter, SkillId};

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    categories: RwLock<BTreeMap<CategoryId, Category>>,
    skills: RwLock<BTreeMap<SkillId, Skill>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a category.
    pub fn put_category(&self, category: Category) -> Result<(), CatalogRepositoryError> {
        self.categories
            .write()
            .map_err(|_| CatalogRepositoryError::query(POISONED))?
            .insert(category.id(), category);
        Ok(())
    }

    /// Add or replace a skill.
    pub fn put_skill(&self, skill: Skill) -> Result<(), CatalogRepositoryError> {
        self.skills
            .write()
            .map_err(|_| CatalogRepositoryError::query(POISONED))?
            .insert(skill.id(), skill);
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogRepositoryError> {
        let categories = self
            .categories
            .read()
            .map_err(|_| CatalogRepositoryError::query(POISONED))?;
        Ok(categories.values().cloned().collect())
    }

    async fn list_skills(&self, filter: &SkillFilter) -> Result<Vec<Skill>, CatalogRepositoryError> {
        let skills = self
            .skills
            .read()
            .map_err(|_| CatalogRepositoryError::query(POISONED))?;
        Ok(skills
            .values()
            .filter(|skill| filter.matches(skill))
            .cloned()
            .collect())
    }

    async fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, CatalogRepositoryError> {
        let skills = self
            .skills
            .read()
            .map_err(|_| CatalogRepositoryError::query(POISONED))?;
        Ok(skills.get(&id).cloned())
    }
}
