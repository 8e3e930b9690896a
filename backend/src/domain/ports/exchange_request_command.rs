//! Driving port for creating and transitioning exchange requests.

use async_trait::async_trait;

use super::ExchangeRequestView;
use crate::domain::{Error, RequestId, RequestStatus, SkillId, UserId};

/// Request body for a new exchange; the requester is the actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExchangeRequest {
    pub to_user: UserId,
    pub requested_skill: SkillId,
    pub offered_skill: Option<SkillId>,
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestCommand: Send + Sync {
    /// Open a pending request from `actor`.
    async fn create(
        &self,
        actor: &UserId,
        request: CreateExchangeRequest,
    ) -> Result<ExchangeRequestView, Error>;

    /// Move request `id` to `target` on behalf of `actor`.
    async fn transition(
        &self,
        actor: &UserId,
        id: RequestId,
        target: RequestStatus,
    ) -> Result<ExchangeRequestView, Error>;
}
