//! In-memory review store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::POISONED;
use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{RatingSummary, Review, UserId};

#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    /// Kept in insertion order.
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn insert(&self, review: Review) -> Result<(), ReviewRepositoryError> {
        let mut reviews = self
            .reviews
            .write()
            .map_err(|_| ReviewRepositoryError::query(POISONED))?;
        let duplicate = reviews.iter().any(|existing| {
            existing.request_id() == review.request_id() && existing.from_user() == review.from_user()
        });
        if duplicate {
            return Err(ReviewRepositoryError::already_reviewed(
                review.request_id().to_string(),
            ));
        }
        reviews.push(review);
        Ok(())
    }

    async fn list_received(&self, user: &UserId) -> Result<Vec<Review>, ReviewRepositoryError> {
        let reviews = self
            .reviews
            .read()
            .map_err(|_| ReviewRepositoryError::query(POISONED))?;
        Ok(reviews
            .iter()
            .rev()
            .filter(|review| review.to_user() == user)
            .cloned()
            .collect())
    }

    async fn summaries(
        &self,
        users: &[UserId],
    ) -> Result<HashMap<UserId, RatingSummary>, ReviewRepositoryError> {
        let reviews = self
            .reviews
            .read()
            .map_err(|_| ReviewRepositoryError::query(POISONED))?;
        let mut summaries: HashMap<UserId, RatingSummary> = HashMap::new();
        for review in reviews.iter().filter(|r| users.contains(r.to_user())) {
            summaries
                .entry(review.to_user().clone())
                .or_default()
                .add(review.rating());
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rating, RequestId, ReviewDraft, ReviewId};
    use crate::test_support::fixture_timestamp;
    use rstest::rstest;

    fn review(from: &UserId, to: &UserId, request_id: RequestId, rating: i64) -> Review {
        Review::new(ReviewDraft {
            id: ReviewId::random(),
            from_user: from.clone(),
            to_user: to.clone(),
            request_id,
            rating: Rating::try_from(rating).expect("rating"),
            comment: String::new(),
            created_at: fixture_timestamp(),
        })
    }

    #[rstest]
    #[tokio::test]
    async fn one_review_per_author_and_request() {
        let repo = InMemoryReviewRepository::new();
        let bob = UserId::random();
        let alice = UserId::random();
        let request = RequestId::random();
        repo.insert(review(&bob, &alice, request, 5)).await.expect("first");
        let err = repo
            .insert(review(&bob, &alice, request, 1))
            .await
            .expect_err("second");
        assert!(matches!(err, ReviewRepositoryError::AlreadyReviewed { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn summaries_and_listing() {
        let repo = InMemoryReviewRepository::new();
        let bob = UserId::random();
        let alice = UserId::random();
        let carol = UserId::random();
        repo.insert(review(&bob, &alice, RequestId::random(), 5)).await.expect("insert");
        repo.insert(review(&carol, &alice, RequestId::random(), 4)).await.expect("insert");
        repo.insert(review(&alice, &bob, RequestId::random(), 2)).await.expect("insert");

        let summaries = repo
            .summaries(&[alice.clone(), carol.clone()])
            .await
            .expect("summaries");
        assert_eq!(summaries.get(&alice).map(RatingSummary::average), Some(4.5));
        assert!(!summaries.contains_key(&carol));

        let received = repo.list_received(&alice).await.expect("list");
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].from_user(), &carol, "newest first");
    }
}
