//! Review handlers.
//!
//! ```text
//! POST /api/v1/reviews/create/ {"swap_request_id":"…","rating":5,"comment":"great"}
//! GET  /api/v1/reviews/user/{user_id}/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{CreateReviewRequest, MemberReviews, ReceivedReview};
use crate::domain::{Error, Rating, Review};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_request_id, parse_user_id,
};

/// Body of `POST /reviews/create/`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateReviewBody {
    pub swap_request_id: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewDto {
    pub id: String,
    pub swap_request_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        Self {
            id: value.id().to_string(),
            swap_request_id: value.request_id().to_string(),
            from_user_id: value.from_user().to_string(),
            to_user_id: value.to_user().to_string(),
            rating: value.rating().get(),
            comment: value.comment().to_owned(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewEnvelope {
    pub review: ReviewDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceivedReviewDto {
    #[serde(flatten)]
    pub review: ReviewDto,
    pub reviewer_username: String,
}

impl From<ReceivedReview> for ReceivedReviewDto {
    fn from(value: ReceivedReview) -> Self {
        Self {
            review: value.review.into(),
            reviewer_username: value.reviewer_username,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberReviewsResponse {
    pub reviews: Vec<ReceivedReviewDto>,
    /// Rounded to one decimal; 0 when unrated.
    pub average_rating: f64,
    pub total_reviews: u32,
}

impl From<MemberReviews> for MemberReviewsResponse {
    fn from(value: MemberReviews) -> Self {
        Self {
            reviews: value.reviews.into_iter().map(Into::into).collect(),
            average_rating: value.average_rating,
            total_reviews: value.total_reviews,
        }
    }
}

fn parse_review_body(body: CreateReviewBody) -> ApiResult<CreateReviewRequest> {
    const REQUEST: FieldName = FieldName::new("swap_request_id");

    let raw_id = body
        .swap_request_id
        .ok_or_else(|| missing_field_error(REQUEST))?;
    let raw_rating = body
        .rating
        .ok_or_else(|| missing_field_error(FieldName::new("rating")))?;
    let rating = Rating::try_from(raw_rating).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "rating",
            "value": err.0,
            "code": "rating_out_of_range",
        }))
    })?;
    Ok(CreateReviewRequest {
        request_id: parse_request_id(&raw_id, REQUEST)?,
        rating,
        comment: body.comment,
    })
}

/// Review the teacher of a completed exchange.
///
/// Only the member who sent the request may review it, once.
#[utoipa::path(
    post,
    path = "/api/v1/reviews/create/",
    request_body = CreateReviewBody,
    responses(
        (status = 201, description = "Review stored", body = ReviewEnvelope),
        (status = 400, description = "Invalid rating or body", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No completed request of yours with this id",
            body = ErrorSchema),
        (status = 409, description = "Already reviewed", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews/create/")]
pub async fn create_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateReviewBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let command = parse_review_body(payload.into_inner())?;
    let review = state.reviews.create(&actor, command).await?;
    Ok(HttpResponse::Created().json(ReviewEnvelope {
        review: review.into(),
    }))
}

/// Reviews a member has received, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/user/{user_id}/",
    params(("user_id" = String, Path, description = "Reviewed member id")),
    responses(
        (status = 200, description = "Received reviews", body = MemberReviewsResponse),
        (status = 400, description = "Malformed user id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown member", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listMemberReviews"
)]
#[get("/reviews/user/{user_id}/")]
pub async fn member_reviews(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MemberReviewsResponse>> {
    session.require_user_id()?;
    let user = parse_user_id(&path.into_inner(), FieldName::new("user_id"))?;
    let reviews = state.reviews_query.reviews_for(&user).await?;
    Ok(web::Json(reviews.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RequestId, ReviewDraft, ReviewId, UserId};
    use crate::inbound::http::auth::{LoginRequest, login};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use crate::test_support::fixture_timestamp;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    fn review(from: &UserId, to: &UserId, rating: i64) -> Review {
        Review::new(ReviewDraft {
            id: ReviewId::random(),
            from_user: from.clone(),
            to_user: to.clone(),
            request_id: RequestId::random(),
            rating: Rating::try_from(rating).expect("rating"),
            comment: "patient teacher".to_owned(),
            created_at: fixture_timestamp(),
        })
    }

    async fn call_as(
        actor: UserId,
        mut ports: MockPorts,
        request: actix_test::TestRequest,
    ) -> (StatusCode, Value) {
        ports
            .login
            .expect_authenticate()
            .returning(move |_| Ok(actor.clone()));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/v1")
                        .service(login)
                        .service(create_review)
                        .service(member_reviews),
                ),
        )
        .await;
        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/login/")
                .set_json(&LoginRequest {
                    username: "bob".into(),
                    password: "demo123".into(),
                })
                .to_request(),
        )
        .await;
        let res =
            actix_test::call_service(&app, request.cookie(session_cookie(&login_res)).to_request())
                .await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn create_returns_created_review() {
        let bob = UserId::random();
        let alice = UserId::random();
        let stored = review(&bob, &alice, 5);
        let request_id = RequestId::random();
        let mut ports = MockPorts::default();
        ports
            .reviews
            .expect_create()
            .withf(move |_, req| req.request_id == request_id && req.rating.get() == 5)
            .times(1)
            .returning(move |_, _| Ok(stored.clone()));

        let (status, body) = call_as(
            bob,
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/reviews/create/")
                .set_json(json!({
                    "swap_request_id": request_id.to_string(),
                    "rating": 5,
                    "comment": "patient teacher",
                })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["review"]["rating"], 5);
        assert_eq!(body["review"]["to_user_id"], alice.to_string());
    }

    #[rstest]
    #[case(json!({"swap_request_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "rating": 0}), "rating")]
    #[case(json!({"swap_request_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "rating": 6}), "rating")]
    #[case(json!({"swap_request_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}), "rating")]
    #[case(json!({"swap_request_id": "nope", "rating": 3}), "swap_request_id")]
    #[case(json!({"rating": 3}), "swap_request_id")]
    #[actix_web::test]
    async fn invalid_review_bodies_are_rejected(#[case] body: Value, #[case] field: &str) {
        let mut ports = MockPorts::default();
        ports.reviews.expect_create().never();

        let (status, body) = call_as(
            UserId::random(),
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/reviews/create/")
                .set_json(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn duplicate_review_is_conflict() {
        let mut ports = MockPorts::default();
        ports
            .reviews
            .expect_create()
            .returning(|_, _| Err(Error::conflict("request already reviewed")));

        let (status, _) = call_as(
            UserId::random(),
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/reviews/create/")
                .set_json(json!({"swap_request_id": RequestId::random().to_string(), "rating": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn member_reviews_include_reviewer_and_average() {
        let bob = UserId::random();
        let alice = UserId::random();
        let received = review(&bob, &alice, 4);
        let expected_user = alice.clone();
        let mut ports = MockPorts::default();
        ports
            .reviews_query
            .expect_reviews_for()
            .withf(move |user| user == &expected_user)
            .returning(move |_| {
                Ok(MemberReviews {
                    reviews: vec![ReceivedReview {
                        review: received.clone(),
                        reviewer_username: "bob".to_owned(),
                    }],
                    average_rating: 4.0,
                    total_reviews: 1,
                })
            });

        let (status, body) = call_as(
            bob,
            ports,
            actix_test::TestRequest::get().uri(&format!("/api/v1/reviews/user/{alice}/")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_reviews"], 1);
        assert_eq!(body["average_rating"], 4.0);
        assert_eq!(body["reviews"][0]["reviewer_username"], "bob");
        assert_eq!(body["reviews"][0]["rating"], 4);
    }
}
