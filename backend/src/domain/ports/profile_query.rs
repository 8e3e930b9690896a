//! Driving port for a member's profile page.

use async_trait::async_trait;

use super::DeclaredSkill;
use crate::domain::{Error, Member, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub member: Member,
    pub skills: Vec<DeclaredSkill>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    async fn profile(&self, user: &UserId) -> Result<MemberProfile, Error>;
}
