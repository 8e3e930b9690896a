//! Driven port onto the member directory.
//!
//! The directory owns identities and profile fields. The core only reads
//! from it to resolve actors and to denormalise usernames and locations.

use async_trait::async_trait;

use crate::domain::{Error, Member, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by directory adapters.
    pub enum MemberDirectoryError {
        Connection { message: String } => "member directory connection failed: {message}",
        Query { message: String } => "member directory query failed: {message}",
    }
}

impl From<MemberDirectoryError> for Error {
    fn from(value: MemberDirectoryError) -> Self {
        match value {
            MemberDirectoryError::Connection { message } => {
                Error::service_unavailable(format!("member directory unavailable: {message}"))
            }
            MemberDirectoryError::Query { message } => {
                Error::internal(format!("member directory error: {message}"))
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Member>, MemberDirectoryError>;

    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<Member>, MemberDirectoryError>;

    /// Members whose ids appear in `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Member>, MemberDirectoryError>;
}
