//! Dashboard counters derived from declarations and requests on each read.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    DashboardQuery, DashboardSummary, ExchangeRequestRepository, UserSkillRepository,
};
use crate::domain::{Error, ExchangeRequest, RequestStatus, UserId, UserSkill};

/// Fold a member's declarations and requests into dashboard counters.
pub fn summarise(
    declarations: &[UserSkill],
    sent: &[ExchangeRequest],
    received: &[ExchangeRequest],
) -> DashboardSummary {
    let teaching_skills = declarations.iter().filter(|d| d.is_teaching()).count();
    let completed = |requests: &[ExchangeRequest]| {
        requests
            .iter()
            .filter(|r| r.status() == RequestStatus::Completed)
            .count()
    };
    DashboardSummary {
        total_skills: declarations.len(),
        teaching_skills,
        learning_skills: declarations.len() - teaching_skills,
        pending_received: received
            .iter()
            .filter(|r| r.status() == RequestStatus::Pending)
            .count(),
        completed_swaps: completed(sent) + completed(received),
    }
}

#[derive(Clone)]
pub struct DashboardService<U, L> {
    user_skills: Arc<U>,
    ledger: Arc<L>,
}

impl<U, L> DashboardService<U, L> {
    pub fn new(user_skills: Arc<U>, ledger: Arc<L>) -> Self {
        Self {
            user_skills,
            ledger,
        }
    }
}

#[async_trait]
impl<U, L> DashboardQuery for DashboardService<U, L>
where
    U: UserSkillRepository,
    L: ExchangeRequestRepository,
{
    async fn summary(&self, user: &UserId) -> Result<DashboardSummary, Error> {
        let declarations = self.user_skills.list_for_user(user).await?;
        let sent = self.ledger.list_sent(user).await?;
        let received = self.ledger.list_received(user).await?;
        Ok(summarise(&declarations, &sent, &received))
    }
}
