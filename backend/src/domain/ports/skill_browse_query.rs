//! Driving port for the teacher-matching browse query.

use async_trait::async_trait;

use crate::domain::{BrowseFilters, Error, SkillListing};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillBrowseQuery: Send + Sync {
    /// Skills matching `filters`, each with the teachers that pass the
    /// location filter. Pure read.
    async fn browse(&self, filters: &BrowseFilters) -> Result<Vec<SkillListing>, Error>;
}
