//! Driving port for a member's received reviews.

use async_trait::async_trait;

use crate::domain::{Error, Review, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedReview {
    pub review: Review,
    pub reviewer_username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberReviews {
    /// Newest first.
    pub reviews: Vec<ReceivedReview>,
    pub average_rating: f64,
    pub total_reviews: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    async fn reviews_for(&self, user: &UserId) -> Result<MemberReviews, Error>;
}
