//! Driving port for reading a member's requests.

use async_trait::async_trait;

use crate::domain::{Error, ExchangeRequest, SkillId, UserId};

/// Display handle for one side of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRef {
    pub id: UserId,
    /// Empty when the directory no longer knows the member.
    pub username: String,
}

/// Display handle for a referenced skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRef {
    pub id: SkillId,
    pub name: String,
}

/// A request joined with the display fields clients render next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequestView {
    pub request: ExchangeRequest,
    pub from_user: PartyRef,
    pub to_user: PartyRef,
    pub requested_skill: SkillRef,
    pub offered_skill: Option<SkillRef>,
}

/// Requests split by the member's side, each list newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLists {
    pub sent: Vec<ExchangeRequestView>,
    pub received: Vec<ExchangeRequestView>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestQuery: Send + Sync {
    async fn list_for(&self, user: &UserId) -> Result<RequestLists, Error>;
}
