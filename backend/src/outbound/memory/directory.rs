//! In-memory member directory.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::ports::{MemberDirectory, MemberDirectoryError};
use crate::domain::{Member, UserId};

#[derive(Debug, Default)]
pub struct InMemoryMemberDirectory {
    members: DashMap<UserId, Member>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a member.
    pub fn put(&self, member: Member) {
        self.members.insert(member.id().clone(), member);
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Member>, MemberDirectoryError> {
        Ok(self.members.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Member>, MemberDirectoryError> {
        Ok(self
            .members
            .iter()
            .find(|entry| entry.username().as_ref() == username)
            .map(|entry| entry.value().clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Member>, MemberDirectoryError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.members.get(id).map(|entry| entry.value().clone()))
            .collect())
    }
}
