//! Request status and the transition table.
//!
//! ```text
//!   pending --(recipient)--> accepted --(either party)--> completed
//!      \
//!       `---(recipient)--> rejected
//! ```
//!
//! `rejected` and `completed` are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an exchange request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

/// Which side of a request an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    /// The member who created the request (`from_user`).
    Requester,
    /// The member the request was sent to (`to_user`).
    Recipient,
}

/// Who may drive a given edge of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeActor {
    RecipientOnly,
    EitherParty,
}

impl EdgeActor {
    pub fn permits(self, party: Party) -> bool {
        match self {
            Self::RecipientOnly => party == Party::Recipient,
            Self::EitherParty => true,
        }
    }
}

impl RequestStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [RequestStatus; 4] = [
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Completed,
    ];

    /// Look up the edge `self -> target`; `None` when no such edge exists.
    pub fn edge_to(self, target: RequestStatus) -> Option<EdgeActor> {
        match (self, target) {
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected) => {
                Some(EdgeActor::RecipientOnly)
            }
            (Self::Accepted, Self::Completed) => Some(EdgeActor::EitherParty),
            _ => None,
        }
    }

    /// No edge leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status label is not one of the four known states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown request status '{0}'; expected pending, accepted, rejected or completed")]
pub struct ParseRequestStatusError(pub String);

impl FromStr for RequestStatus {
    type Err = ParseRequestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseRequestStatusError(s.to_owned())),
        }
    }
}
