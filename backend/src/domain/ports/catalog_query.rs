//! Driving port for catalog listings.

use async_trait::async_trait;

use crate::domain::{Category, Error, Skill, SkillFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, Error>;

    async fn skills(&self, filter: &SkillFilter) -> Result<Vec<Skill>, Error>;
}
