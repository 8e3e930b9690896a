//! Request ledger service: creation, status transitions and per-member
//! listings for exchange requests.
//!
//! Transitions are validated against a snapshot and written with
//! compare-and-set on the expected status. When a concurrent writer wins, the
//! loser re-validates against the record it lost to, so a racing accept and
//! reject leave exactly one applied and the other sees `InvalidTransition`.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CasOutcome, CatalogRepository, CreateExchangeRequest, ExchangeRequestCommand,
    ExchangeRequestQuery, ExchangeRequestRepository, ExchangeRequestView, InsertOutcome,
    MemberDirectory, PartyRef, RequestLists, SkillRef, UserSkillRepository,
};
use crate::domain::{
    DEFAULT_MESSAGE_MAX_CHARS, Error, ExchangeError, ExchangeRequest, Member, NewExchangeRequest,
    RequestId, RequestMessage, RequestStatus, Skill, SkillFilter, SkillId, UserId,
};

/// Whether a second pending request for the same teacher and skill is
/// refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateRequestPolicy {
    #[default]
    RejectPending,
    Allow,
}

/// Error returned when parsing a [`DuplicateRequestPolicy`] fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown duplicate request policy '{0}'; expected reject_pending or allow")]
pub struct ParseDuplicatePolicyError(pub String);

impl FromStr for DuplicateRequestPolicy {
    type Err = ParseDuplicatePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject_pending" => Ok(Self::RejectPending),
            "allow" => Ok(Self::Allow),
            other => Err(ParseDuplicatePolicyError(other.to_owned())),
        }
    }
}

/// Tunables applied when opening requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    pub message_max_chars: usize,
    pub duplicate_requests: DuplicateRequestPolicy,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            message_max_chars: DEFAULT_MESSAGE_MAX_CHARS,
            duplicate_requests: DuplicateRequestPolicy::default(),
        }
    }
}

/// Compare-and-set attempts before giving up. Each lost race moves the
/// stored record one edge further along an acyclic graph, so the bound is
/// never reached by a correct adapter.
const MAX_TRANSITION_ATTEMPTS: usize = RequestStatus::ALL.len();

/// Owns every mutation of exchange requests.
#[derive(Clone)]
pub struct RequestLedgerService<L, U, C, M> {
    ledger: Arc<L>,
    user_skills: Arc<U>,
    catalog: Arc<C>,
    directory: Arc<M>,
    clock: Arc<dyn Clock>,
    policy: RequestPolicy,
}

impl<L, U, C, M> RequestLedgerService<L, U, C, M> {
    pub fn new(
        ledger: Arc<L>,
        user_skills: Arc<U>,
        catalog: Arc<C>,
        directory: Arc<M>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            user_skills,
            catalog,
            directory,
            clock,
            policy: RequestPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RequestPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<L, U, C, M> RequestLedgerService<L, U, C, M>
where
    L: ExchangeRequestRepository,
    U: UserSkillRepository,
    C: CatalogRepository,
    M: MemberDirectory,
{
    /// Open a pending request from `actor`.
    ///
    /// Checks run in order: message length, self-request, teacher
    /// declaration, offered skill existence, duplicate guard.
    pub async fn open(
        &self,
        actor: &UserId,
        request: CreateExchangeRequest,
    ) -> Result<ExchangeRequest, Error> {
        let CreateExchangeRequest {
            to_user,
            requested_skill,
            offered_skill,
            message,
        } = request;
        let message = RequestMessage::new(message, self.policy.message_max_chars)?;
        let draft = NewExchangeRequest {
            from_user: actor.clone(),
            to_user,
            requested_skill,
            offered_skill,
            message,
        };
        let record = ExchangeRequest::open(RequestId::random(), draft, self.clock.utc())?;

        if !self
            .user_skills
            .teaches(record.to_user(), requested_skill)
            .await?
        {
            debug!(
                to_user = %record.to_user(),
                skill = %requested_skill,
                "recipient does not teach skill"
            );
            return Err(ExchangeError::UnknownTeacher {
                user_id: record.to_user().clone(),
                skill_id: requested_skill,
            }
            .into());
        }
        if let Some(offered) = offered_skill {
            if self.catalog.find_skill(offered).await?.is_none() {
                return Err(ExchangeError::validation(
                    "offered_skill_id",
                    format!("offered skill {offered} does not exist"),
                )
                .into());
            }
        }
        match self.policy.duplicate_requests {
            DuplicateRequestPolicy::Allow => self.ledger.insert(record.clone()).await?,
            DuplicateRequestPolicy::RejectPending => {
                let outcome = self.ledger.insert_unless_pending(record.clone()).await?;
                if outcome == InsertOutcome::PendingExists {
                    debug!(
                        from_user = %actor,
                        to_user = %record.to_user(),
                        skill = %requested_skill,
                        "pending request already open"
                    );
                    return Err(ExchangeError::DuplicateRequest.into());
                }
            }
        }
        info!(
            request_id = %record.id(),
            from_user = %record.from_user(),
            to_user = %record.to_user(),
            skill = %requested_skill,
            "exchange request created"
        );
        Ok(record)
    }

    /// Move request `id` to `target` on behalf of `actor`.
    pub async fn apply_transition(
        &self,
        actor: &UserId,
        id: RequestId,
        target: RequestStatus,
    ) -> Result<ExchangeRequest, Error> {
        let mut current = self
            .ledger
            .find(id)
            .await?
            .ok_or(ExchangeError::NotFound { request_id: id })?;

        for _ in 0..MAX_TRANSITION_ATTEMPTS {
            if let Err(rejection) = current.check_transition(actor, target) {
                debug!(
                    request_id = %id,
                    actor = %actor,
                    to = %target,
                    reason = rejection.reason(),
                    "transition rejected"
                );
                return Err(rejection.into());
            }
            let next = current.transitioned(target, self.clock.utc());
            match self.ledger.compare_and_set(next, current.status()).await? {
                CasOutcome::Updated(stored) => {
                    info!(
                        request_id = %id,
                        actor = %actor,
                        from = %current.status(),
                        to = %target,
                        "exchange request transitioned"
                    );
                    return Ok(stored);
                }
                CasOutcome::Conflict(latest) => {
                    debug!(request_id = %id, status = %latest.status(), "lost transition race");
                    current = latest;
                }
                CasOutcome::NotFound => {
                    return Err(ExchangeError::NotFound { request_id: id }.into());
                }
            }
        }
        warn!(request_id = %id, "transition did not settle");
        Err(Error::conflict("request changed concurrently; reload and retry"))
    }

    /// Requests `user` sent and received, newest first.
    pub async fn requests_for(
        &self,
        user: &UserId,
    ) -> Result<(Vec<ExchangeRequest>, Vec<ExchangeRequest>), Error> {
        let sent = self.ledger.list_sent(user).await?;
        let received = self.ledger.list_received(user).await?;
        Ok((sent, received))
    }

    async fn describe(
        &self,
        requests: Vec<ExchangeRequest>,
    ) -> Result<Vec<ExchangeRequestView>, Error> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let mut member_ids: Vec<UserId> = requests
            .iter()
            .flat_map(|r| [r.from_user().clone(), r.to_user().clone()])
            .collect();
        member_ids.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
        member_ids.dedup();
        let members: HashMap<UserId, Member> = self
            .directory
            .find_many(&member_ids)
            .await?
            .into_iter()
            .map(|m| (m.id().clone(), m))
            .collect();
        let skills: HashMap<SkillId, Skill> = self
            .catalog
            .list_skills(&SkillFilter::default())
            .await?
            .into_iter()
            .map(|s| (s.id(), s))
            .collect();

        let party = |id: &UserId| PartyRef {
            id: id.clone(),
            username: members
                .get(id)
                .map(|m| m.username().to_string())
                .unwrap_or_default(),
        };
        let skill = |id: SkillId| SkillRef {
            id,
            name: skills
                .get(&id)
                .map(|s| s.name().to_owned())
                .unwrap_or_default(),
        };
        Ok(requests
            .into_iter()
            .map(|request| ExchangeRequestView {
                from_user: party(request.from_user()),
                to_user: party(request.to_user()),
                requested_skill: skill(request.requested_skill()),
                offered_skill: request.offered_skill().map(skill),
                request,
            })
            .collect())
    }

    async fn describe_one(&self, request: ExchangeRequest) -> Result<ExchangeRequestView, Error> {
        self.describe(vec![request])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("request view missing"))
    }
}

#[async_trait]
impl<L, U, C, M> ExchangeRequestCommand for RequestLedgerService<L, U, C, M>
where
    L: ExchangeRequestRepository,
    U: UserSkillRepository,
    C: CatalogRepository,
    M: MemberDirectory,
{
    async fn create(
        &self,
        actor: &UserId,
        request: CreateExchangeRequest,
    ) -> Result<ExchangeRequestView, Error> {
        let record = self.open(actor, request).await?;
        self.describe_one(record).await
    }

    async fn transition(
        &self,
        actor: &UserId,
        id: RequestId,
        target: RequestStatus,
    ) -> Result<ExchangeRequestView, Error> {
        let record = self.apply_transition(actor, id, target).await?;
        self.describe_one(record).await
    }
}

#[async_trait]
impl<L, U, C, M> ExchangeRequestQuery for RequestLedgerService<L, U, C, M>
where
    L: ExchangeRequestRepository,
    U: UserSkillRepository,
    C: CatalogRepository,
    M: MemberDirectory,
{
    async fn list_for(&self, user: &UserId) -> Result<RequestLists, Error> {
        let (sent, received) = self.requests_for(user).await?;
        Ok(RequestLists {
            sent: self.describe(sent).await?,
            received: self.describe(received).await?,
        })
    }
}

#[cfg(test)]
#[path = "request_ledger_tests.rs"]
mod tests;
