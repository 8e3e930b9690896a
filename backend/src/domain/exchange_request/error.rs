//! Failures raised by the request ledger.

use serde_json::json;

use super::{RequestId, RequestStatus};
use crate::domain::{Error, SkillId, UserId};

/// Typed ledger failure. Converted into [`Error`] at the port boundary with
/// a stable `details.reason` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("cannot send an exchange request to yourself")]
    SelfRequest,
    #[error("user {user_id} does not teach skill {skill_id}")]
    UnknownTeacher { user_id: UserId, skill_id: SkillId },
    #[error("a pending request for this skill has already been sent")]
    DuplicateRequest,
    #[error("user {actor} may not move this request to {target}")]
    Forbidden { actor: UserId, target: RequestStatus },
    #[error("cannot move a request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
    #[error("exchange request {request_id} not found")]
    NotFound { request_id: RequestId },
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

impl ExchangeError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Machine-stable reason string surfaced in error details.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::SelfRequest => "self_request",
            Self::UnknownTeacher { .. } => "unknown_teacher",
            Self::DuplicateRequest => "duplicate_request",
            Self::Forbidden { .. } => "forbidden",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation_error",
        }
    }
}

impl From<ExchangeError> for Error {
    fn from(value: ExchangeError) -> Self {
        let message = value.to_string();
        let reason = value.reason();
        match &value {
            ExchangeError::SelfRequest | ExchangeError::DuplicateRequest => {
                Error::invalid_request(message).with_details(json!({ "reason": reason }))
            }
            ExchangeError::UnknownTeacher { user_id, skill_id } => Error::invalid_request(message)
                .with_details(json!({
                    "reason": reason,
                    "toUserId": user_id.as_ref(),
                    "requestedSkillId": skill_id.get(),
                })),
            ExchangeError::Validation { field, .. } => Error::invalid_request(message)
                .with_details(json!({ "reason": reason, "field": field })),
            ExchangeError::Forbidden { target, .. } => Error::forbidden(message)
                .with_details(json!({ "reason": reason, "target": target.as_str() })),
            ExchangeError::InvalidTransition { from, to } => Error::conflict(message)
                .with_details(json!({
                    "reason": reason,
                    "from": from.as_str(),
                    "to": to.as_str(),
                })),
            ExchangeError::NotFound { request_id } => Error::not_found(message).with_details(
                json!({ "reason": reason, "requestId": request_id.to_string() }),
            ),
        }
    }
}
