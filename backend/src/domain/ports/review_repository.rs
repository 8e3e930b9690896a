//! Driven port for review storage.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Error, RatingSummary, Review, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by review adapters.
    pub enum ReviewRepositoryError {
        Connection { message: String } => "review store connection failed: {message}",
        Query { message: String } => "review store query failed: {message}",
        /// The request already carries a review from this member.
        AlreadyReviewed { request_id: String } => "request {request_id} was already reviewed",
    }
}

impl From<ReviewRepositoryError> for Error {
    fn from(value: ReviewRepositoryError) -> Self {
        match value {
            ReviewRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("review store unavailable: {message}"))
            }
            ReviewRepositoryError::Query { message } => {
                Error::internal(format!("review store error: {message}"))
            }
            ReviewRepositoryError::AlreadyReviewed { .. } => {
                Error::conflict("you have already reviewed this exchange")
                    .with_details(serde_json::json!({ "reason": "already_reviewed" }))
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Store `review` unless its author already reviewed the same request.
    async fn insert(&self, review: Review) -> Result<(), ReviewRepositoryError>;

    /// Reviews received by `user`, newest first.
    async fn list_received(&self, user: &UserId) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Rating summaries for each of `users` that has been reviewed.
    async fn summaries(
        &self,
        users: &[UserId],
    ) -> Result<HashMap<UserId, RatingSummary>, ReviewRepositoryError>;
}
