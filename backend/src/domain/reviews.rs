//! Review service: requesters rate the member who taught them once the
//! exchange is completed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CreateReviewRequest, ExchangeRequestRepository, MemberDirectory, MemberReviews,
    ReceivedReview, ReviewCommand, ReviewQuery, ReviewRepository,
};
use crate::domain::{
    Error, Member, RatingSummary, RequestStatus, Review, ReviewDraft, ReviewId, UserId,
};

/// Upper bound on review comment length, in characters.
pub const REVIEW_COMMENT_MAX_CHARS: usize = 2000;

#[derive(Clone)]
pub struct ReviewService<V, L, M> {
    reviews: Arc<V>,
    ledger: Arc<L>,
    directory: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<V, L, M> ReviewService<V, L, M> {
    pub fn new(reviews: Arc<V>, ledger: Arc<L>, directory: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            reviews,
            ledger,
            directory,
            clock,
        }
    }
}

#[async_trait]
impl<V, L, M> ReviewCommand for ReviewService<V, L, M>
where
    V: ReviewRepository,
    L: ExchangeRequestRepository,
    M: MemberDirectory,
{
    async fn create(&self, actor: &UserId, request: CreateReviewRequest) -> Result<Review, Error> {
        let comment = request.comment.trim();
        if comment.chars().count() > REVIEW_COMMENT_MAX_CHARS {
            return Err(Error::invalid_request(format!(
                "comment must be at most {REVIEW_COMMENT_MAX_CHARS} characters"
            ))
            .with_details(json!({ "field": "comment" })));
        }

        // Only the requester of a completed exchange may review it. Any other
        // caller sees the same not-found answer as for an unknown id.
        let exchange = self
            .ledger
            .find(request.request_id)
            .await?
            .filter(|r| r.status() == RequestStatus::Completed && r.from_user() == actor)
            .ok_or_else(|| {
                Error::not_found("completed exchange not found").with_details(json!({
                    "requestId": request.request_id.to_string(),
                }))
            })?;

        let review = Review::new(ReviewDraft {
            id: ReviewId::random(),
            from_user: actor.clone(),
            to_user: exchange.to_user().clone(),
            request_id: exchange.id(),
            rating: request.rating,
            comment: comment.to_owned(),
            created_at: self.clock.utc(),
        });
        self.reviews.insert(review.clone()).await?;
        info!(
            request_id = %exchange.id(),
            reviewer = %actor,
            reviewee = %exchange.to_user(),
            rating = review.rating().get(),
            "review recorded"
        );
        Ok(review)
    }
}

#[async_trait]
impl<V, L, M> ReviewQuery for ReviewService<V, L, M>
where
    V: ReviewRepository,
    L: ExchangeRequestRepository,
    M: MemberDirectory,
{
    async fn reviews_for(&self, user: &UserId) -> Result<MemberReviews, Error> {
        let reviews = self.reviews.list_received(user).await?;
        let summary: RatingSummary = reviews.iter().collect();

        let mut reviewer_ids: Vec<UserId> = reviews.iter().map(|r| r.from_user().clone()).collect();
        reviewer_ids.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
        reviewer_ids.dedup();
        let reviewers: HashMap<UserId, Member> = if reviewer_ids.is_empty() {
            HashMap::new()
        } else {
            self.directory
                .find_many(&reviewer_ids)
                .await?
                .into_iter()
                .map(|m| (m.id().clone(), m))
                .collect()
        };

        Ok(MemberReviews {
            average_rating: summary.average(),
            total_reviews: summary.count(),
            reviews: reviews
                .into_iter()
                .map(|review| ReceivedReview {
                    reviewer_username: reviewers
                        .get(review.from_user())
                        .map(|m| m.username().to_string())
                        .unwrap_or_default(),
                    review,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockExchangeRequestRepository, MockMemberDirectory, MockReviewRepository,
        ReviewRepositoryError,
    };
    use crate::domain::{
        ErrorCode, ExchangeRequest, NewExchangeRequest, Rating, RequestId, RequestMessage,
        SkillId,
    };
    use crate::test_support::{MutableClock, fixture_timestamp, member};
    use rstest::rstest;

    type Service =
        ReviewService<MockReviewRepository, MockExchangeRequestRepository, MockMemberDirectory>;

    fn service(
        reviews: MockReviewRepository,
        ledger: MockExchangeRequestRepository,
        directory: MockMemberDirectory,
    ) -> Service {
        ReviewService::new(
            Arc::new(reviews),
            Arc::new(ledger),
            Arc::new(directory),
            Arc::new(MutableClock::new(fixture_timestamp())),
        )
    }

    fn exchange(from: &UserId, to: &UserId, status: RequestStatus) -> ExchangeRequest {
        let pending = ExchangeRequest::open(
            RequestId::random(),
            NewExchangeRequest {
                from_user: from.clone(),
                to_user: to.clone(),
                requested_skill: SkillId::new(1),
                offered_skill: None,
                message: RequestMessage::default(),
            },
            fixture_timestamp(),
        )
        .expect("valid exchange");
        match status {
            RequestStatus::Pending => pending,
            RequestStatus::Completed => pending
                .transitioned(RequestStatus::Accepted, fixture_timestamp())
                .transitioned(RequestStatus::Completed, fixture_timestamp()),
            other => pending.transitioned(other, fixture_timestamp()),
        }
    }

    fn review_of(request_id: RequestId, rating: i64) -> CreateReviewRequest {
        CreateReviewRequest {
            request_id,
            rating: Rating::try_from(rating).expect("rating"),
            comment: "  Great teacher ".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn requester_reviews_completed_exchange() {
        let bob = UserId::random();
        let alice = UserId::random();
        let done = exchange(&bob, &alice, RequestStatus::Completed);
        let id = done.id();
        let mut ledger = MockExchangeRequestRepository::new();
        ledger.expect_find().returning(move |_| Ok(Some(done.clone())));
        let mut reviews = MockReviewRepository::new();
        let expected_reviewee = alice.clone();
        reviews
            .expect_insert()
            .withf(move |r| r.to_user() == &expected_reviewee && r.comment() == "Great teacher")
            .times(1)
            .returning(|_| Ok(()));

        let review = service(reviews, ledger, MockMemberDirectory::new())
            .create(&bob, review_of(id, 5))
            .await
            .expect("review stored");
        assert_eq!(review.rating().get(), 5);
        assert_eq!(review.request_id(), id);
    }

    #[rstest]
    #[case(RequestStatus::Accepted, true)]
    #[case(RequestStatus::Completed, false)]
    #[tokio::test]
    async fn unreviewable_exchanges_are_not_found(
        #[case] status: RequestStatus,
        #[case] actor_is_requester: bool,
    ) {
        let bob = UserId::random();
        let alice = UserId::random();
        let record = exchange(&bob, &alice, status);
        let id = record.id();
        let mut ledger = MockExchangeRequestRepository::new();
        ledger.expect_find().returning(move |_| Ok(Some(record.clone())));
        let mut reviews = MockReviewRepository::new();
        reviews.expect_insert().never();
        let actor = if actor_is_requester { bob } else { alice };

        let error = service(reviews, ledger, MockMemberDirectory::new())
            .create(&actor, review_of(id, 4))
            .await
            .expect_err("not reviewable");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn second_review_is_a_conflict() {
        let bob = UserId::random();
        let done = exchange(&bob, &UserId::random(), RequestStatus::Completed);
        let id = done.id();
        let mut ledger = MockExchangeRequestRepository::new();
        ledger.expect_find().returning(move |_| Ok(Some(done.clone())));
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_insert()
            .returning(move |_| Err(ReviewRepositoryError::already_reviewed(id.to_string())));

        let error = service(reviews, ledger, MockMemberDirectory::new())
            .create(&bob, review_of(id, 3))
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn reviews_for_reports_average_and_reviewers() {
        let bob = member("bob", "Boston");
        let alice = UserId::random();
        let request_id = RequestId::random();
        let make = |rating: i64| {
            Review::new(ReviewDraft {
                id: ReviewId::random(),
                from_user: bob.id().clone(),
                to_user: alice.clone(),
                request_id,
                rating: Rating::try_from(rating).expect("rating"),
                comment: String::new(),
                created_at: fixture_timestamp(),
            })
        };
        let received = vec![make(5), make(4)];
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_list_received()
            .returning(move |_| Ok(received.clone()));
        let mut directory = MockMemberDirectory::new();
        let reviewer = bob.clone();
        directory
            .expect_find_many()
            .returning(move |_| Ok(vec![reviewer.clone()]));

        let summary = service(reviews, MockExchangeRequestRepository::new(), directory)
            .reviews_for(&alice)
            .await
            .expect("reviews");
        assert_eq!(summary.total_reviews, 2);
        assert_eq!(summary.average_rating, 4.5);
        assert_eq!(summary.reviews[0].reviewer_username, "bob");
    }

    #[rstest]
    #[tokio::test]
    async fn unreviewed_member_has_zero_average() {
        let mut reviews = MockReviewRepository::new();
        reviews.expect_list_received().returning(|_| Ok(Vec::new()));
        let mut directory = MockMemberDirectory::new();
        directory.expect_find_many().never();

        let summary = service(reviews, MockExchangeRequestRepository::new(), directory)
            .reviews_for(&UserId::random())
            .await
            .expect("reviews");
        assert_eq!(summary.total_reviews, 0);
        assert_eq!(summary.average_rating, 0.0);
    }
}
