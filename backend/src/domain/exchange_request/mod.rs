//! Exchange requests and their state machine.
//!
//! An [`ExchangeRequest`] is opened by the requester in
//! [`RequestStatus::Pending`] and afterwards changes only through
//! [`ExchangeRequest::transitioned`], which is valid solely for edges
//! accepted by [`ExchangeRequest::check_transition`]. Parties, skills and the
//! message are fixed at creation.
//!
//! A party driving an edge reserved for the other side, such as the requester
//! accepting their own request, is `Forbidden` (403) rather than
//! `InvalidTransition`: the edge exists, the actor lacks permission for it.
//! `InvalidTransition` (409) is kept for edges missing from the current status.

mod error;
mod status;

pub use error::ExchangeError;
pub use status::{EdgeActor, ParseRequestStatusError, Party, RequestStatus};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{SkillId, UserId};

/// Default upper bound on request message length, in characters.
pub const DEFAULT_MESSAGE_MAX_CHARS: usize = 1000;

/// Ledger-assigned request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// Free-text note attached to a request, bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestMessage(String);

impl RequestMessage {
    /// Validate `text` against `max_chars`. Surrounding whitespace is trimmed.
    pub fn new(text: impl Into<String>, max_chars: usize) -> Result<Self, ExchangeError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.chars().count() > max_chars {
            return Err(ExchangeError::validation(
                "message",
                format!("message must be at most {max_chars} characters"),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Caller-supplied fields for a new request.
#[derive(Debug, Clone)]
pub struct NewExchangeRequest {
    pub from_user: UserId,
    pub to_user: UserId,
    pub requested_skill: SkillId,
    pub offered_skill: Option<SkillId>,
    pub message: RequestMessage,
}

/// A proposed skill exchange between two members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    id: RequestId,
    from_user: UserId,
    to_user: UserId,
    requested_skill: SkillId,
    offered_skill: Option<SkillId>,
    message: RequestMessage,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ExchangeRequest {
    /// Open a pending request.
    ///
    /// # Errors
    /// [`ExchangeError::SelfRequest`] when both parties are the same member.
    pub fn open(
        id: RequestId,
        draft: NewExchangeRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, ExchangeError> {
        let NewExchangeRequest {
            from_user,
            to_user,
            requested_skill,
            offered_skill,
            message,
        } = draft;
        if from_user == to_user {
            return Err(ExchangeError::SelfRequest);
        }
        Ok(Self {
            id,
            from_user,
            to_user,
            requested_skill,
            offered_skill,
            message,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn from_user(&self) -> &UserId {
        &self.from_user
    }

    pub fn to_user(&self) -> &UserId {
        &self.to_user
    }

    pub fn requested_skill(&self) -> SkillId {
        self.requested_skill
    }

    pub fn offered_skill(&self) -> Option<SkillId> {
        self.offered_skill
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Side of the request `user` is on, if any.
    pub fn party_of(&self, user: &UserId) -> Option<Party> {
        if *user == self.from_user {
            Some(Party::Requester)
        } else if *user == self.to_user {
            Some(Party::Recipient)
        } else {
            None
        }
    }

    /// Validate that `actor` may move this request to `target`.
    ///
    /// Checks run in order: the actor must be a party (`Forbidden`), the
    /// edge must exist from the current status (`InvalidTransition`), and the
    /// actor's side must be allowed to drive that edge (`Forbidden`).
    pub fn check_transition(
        &self,
        actor: &UserId,
        target: RequestStatus,
    ) -> Result<(), ExchangeError> {
        let forbidden = || ExchangeError::Forbidden {
            actor: actor.clone(),
            target,
        };
        let party = self.party_of(actor).ok_or_else(forbidden)?;
        let edge = self
            .status
            .edge_to(target)
            .ok_or(ExchangeError::InvalidTransition {
                from: self.status,
                to: target,
            })?;
        if edge.permits(party) {
            Ok(())
        } else {
            Err(forbidden())
        }
    }

    /// Copy of this request moved to `target`.
    ///
    /// `updated_at` never moves backwards even if the clock does. Callers
    /// must have validated the edge with [`Self::check_transition`].
    pub fn transitioned(&self, target: RequestStatus, now: DateTime<Utc>) -> Self {
        Self {
            status: target,
            updated_at: now.max(self.updated_at),
            ..self.clone()
        }
    }
}
