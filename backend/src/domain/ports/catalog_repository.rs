//! Driven port for catalog reference data.

use async_trait::async_trait;

use crate::domain::{Category, Error, Skill, SkillFilter, SkillId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalog adapters.
    pub enum CatalogRepositoryError {
        /// Backing store could not be reached.
        Connection { message: String } => "catalog connection failed: {message}",
        /// Read failed during execution.
        Query { message: String } => "catalog query failed: {message}",
    }
}

impl From<CatalogRepositoryError> for Error {
    fn from(value: CatalogRepositoryError) -> Self {
        match value {
            CatalogRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("catalog unavailable: {message}"))
            }
            CatalogRepositoryError::Query { message } => {
                Error::internal(format!("catalog error: {message}"))
            }
        }
    }
}

/// Read access to categories and skills.
///
/// Results are ordered by identifier so listings are stable across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogRepositoryError>;

    /// Skills accepted by `filter`.
    async fn list_skills(&self, filter: &SkillFilter) -> Result<Vec<Skill>, CatalogRepositoryError>;

    async fn find_skill(&self, id: SkillId) -> Result<Option<Skill>, CatalogRepositoryError>;
}
