//! Driven port for the request ledger's storage.
//!
//! Status changes go through [`ExchangeRequestRepository::compare_and_set`],
//! which must apply the write only while the stored status still equals the
//! caller's expectation. This makes the read, validate, write sequence in the
//! ledger service atomic per request.
//! [`ExchangeRequestRepository::insert_unless_pending`] does the same for the
//! duplicate guard on creation.

use async_trait::async_trait;

use crate::domain::{Error, ExchangeRequest, RequestId, RequestStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ledger storage adapters.
    pub enum ExchangeRequestRepositoryError {
        Connection { message: String } => "request ledger connection failed: {message}",
        Query { message: String } => "request ledger query failed: {message}",
        /// An insert reused an identifier that is already stored.
        DuplicateId { id: String } => "request id {id} already exists",
    }
}

impl From<ExchangeRequestRepositoryError> for Error {
    fn from(value: ExchangeRequestRepositoryError) -> Self {
        match value {
            ExchangeRequestRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("request ledger unavailable: {message}"))
            }
            ExchangeRequestRepositoryError::Query { message } => {
                Error::internal(format!("request ledger error: {message}"))
            }
            ExchangeRequestRepositoryError::DuplicateId { id } => {
                Error::internal(format!("request id collision: {id}"))
            }
        }
    }
}

/// Result of a conditional status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasOutcome {
    /// The write was applied; carries the stored record.
    Updated(ExchangeRequest),
    /// The stored status no longer matched; carries the current record.
    Conflict(ExchangeRequest),
    NotFound,
}

/// Result of a guarded insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A pending request with the same requester, recipient and skill is
    /// already stored; nothing was written.
    PendingExists,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRequestRepository: Send + Sync {
    async fn insert(&self, request: ExchangeRequest) -> Result<(), ExchangeRequestRepositoryError>;

    async fn find(
        &self,
        id: RequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Replace the stored record with `next` if its status is still
    /// `expected`.
    async fn compare_and_set(
        &self,
        next: ExchangeRequest,
        expected: RequestStatus,
    ) -> Result<CasOutcome, ExchangeRequestRepositoryError>;

    /// Requests created by `user`, newest first.
    async fn list_sent(
        &self,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Requests addressed to `user`, newest first.
    async fn list_received(
        &self,
        user: &UserId,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError>;

    /// Store `request` unless its requester already has a pending request
    /// to the same recipient for the same skill. The check and the write
    /// must not interleave with another guarded insert.
    async fn insert_unless_pending(
        &self,
        request: ExchangeRequest,
    ) -> Result<InsertOutcome, ExchangeRequestRepositoryError>;
}
