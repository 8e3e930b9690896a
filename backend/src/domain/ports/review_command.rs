//! Driving port for reviewing a completed exchange.

use async_trait::async_trait;

use crate::domain::{Error, Rating, RequestId, Review, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewRequest {
    pub request_id: RequestId,
    pub rating: Rating,
    pub comment: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    async fn create(&self, actor: &UserId, request: CreateReviewRequest) -> Result<Review, Error>;
}
