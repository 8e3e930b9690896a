//! Exchange request handlers: send, list and move through the lifecycle.
//!
//! ```text
//! POST /api/v1/requests/send/ {"to_user_id":"…","requested_skill_id":1,"message":"hi"}
//! GET  /api/v1/requests/
//! POST /api/v1/requests/{id}/update/ {"status":"accepted"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{CreateExchangeRequest, ExchangeRequestView, RequestLists};
use crate::domain::SkillId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_request_id, parse_status, parse_user_id,
};

/// Body of `POST /requests/send/`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SendRequestBody {
    pub to_user_id: Option<String>,
    pub requested_skill_id: Option<u32>,
    pub offered_skill_id: Option<u32>,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /requests/{id}/update/`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusBody {
    #[schema(example = "accepted")]
    pub status: Option<String>,
}

/// An exchange request with both parties' usernames and skill names.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExchangeRequestDto {
    pub id: String,
    pub from_user_id: String,
    pub from_username: String,
    pub to_user_id: String,
    pub to_username: String,
    pub requested_skill_id: u32,
    pub requested_skill_name: String,
    pub offered_skill_id: Option<u32>,
    pub offered_skill_name: Option<String>,
    pub message: String,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ExchangeRequestView> for ExchangeRequestDto {
    fn from(value: ExchangeRequestView) -> Self {
        let ExchangeRequestView {
            request,
            from_user,
            to_user,
            requested_skill,
            offered_skill,
        } = value;
        Self {
            id: request.id().to_string(),
            from_user_id: from_user.id.to_string(),
            from_username: from_user.username,
            to_user_id: to_user.id.to_string(),
            to_username: to_user.username,
            requested_skill_id: requested_skill.id.get(),
            requested_skill_name: requested_skill.name,
            offered_skill_id: offered_skill.as_ref().map(|skill| skill.id.get()),
            offered_skill_name: offered_skill.map(|skill| skill.name),
            message: request.message().to_owned(),
            status: request.status().to_string(),
            created_at: request.created_at().to_rfc3339(),
            updated_at: request.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestEnvelope {
    pub request: ExchangeRequestDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestListsResponse {
    pub sent_requests: Vec<ExchangeRequestDto>,
    pub received_requests: Vec<ExchangeRequestDto>,
}

impl From<RequestLists> for RequestListsResponse {
    fn from(value: RequestLists) -> Self {
        Self {
            sent_requests: value.sent.into_iter().map(Into::into).collect(),
            received_requests: value.received.into_iter().map(Into::into).collect(),
        }
    }
}

fn parse_send_body(body: SendRequestBody) -> ApiResult<CreateExchangeRequest> {
    const TO_USER: FieldName = FieldName::new("to_user_id");
    const REQUESTED: FieldName = FieldName::new("requested_skill_id");

    let to_user = body.to_user_id.ok_or_else(|| missing_field_error(TO_USER))?;
    let requested = body
        .requested_skill_id
        .ok_or_else(|| missing_field_error(REQUESTED))?;
    Ok(CreateExchangeRequest {
        to_user: parse_user_id(&to_user, TO_USER)?,
        requested_skill: SkillId::new(requested),
        offered_skill: body.offered_skill_id.map(SkillId::new),
        message: body.message,
    })
}

/// Send an exchange request to a member who teaches the requested skill.
#[utoipa::path(
    post,
    path = "/api/v1/requests/send/",
    request_body = SendRequestBody,
    responses(
        (status = 201, description = "Request created", body = RequestEnvelope),
        (status = 400, description = "Self request, unknown teacher, duplicate or invalid body",
            body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "sendRequest"
)]
#[post("/requests/send/")]
pub async fn send_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SendRequestBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let command = parse_send_body(payload.into_inner())?;
    let view = state.requests.create(&actor, command).await?;
    Ok(HttpResponse::Created().json(RequestEnvelope {
        request: view.into(),
    }))
}

/// Requests the current member sent and received, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/requests/",
    responses(
        (status = 200, description = "Sent and received requests", body = RequestListsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listRequests"
)]
#[get("/requests/")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<RequestListsResponse>> {
    let actor = session.require_user_id()?;
    let lists = state.requests_query.list_for(&actor).await?;
    Ok(web::Json(lists.into()))
}

/// Move a request to a new status.
///
/// Only the recipient may accept or reject a pending request; either party
/// may complete an accepted one.
#[utoipa::path(
    post,
    path = "/api/v1/requests/{id}/update/",
    params(("id" = String, Path, description = "Exchange request id")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Updated request", body = RequestEnvelope),
        (status = 400, description = "Unknown status or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Actor may not take this transition", body = ErrorSchema),
        (status = 404, description = "Request not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed from current status",
            body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "updateRequestStatus"
)]
#[post("/requests/{id}/update/")]
pub async fn update_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<web::Json<RequestEnvelope>> {
    const STATUS: FieldName = FieldName::new("status");

    let actor = session.require_user_id()?;
    let id = parse_request_id(&path.into_inner(), FieldName::new("id"))?;
    let raw_status = payload
        .into_inner()
        .status
        .ok_or_else(|| missing_field_error(STATUS))?;
    let target = parse_status(&raw_status, STATUS)?;
    debug!(request_id = %id, to = %target, "status update requested");
    let view = state.requests.transition(&actor, id, target).await?;
    Ok(web::Json(RequestEnvelope {
        request: view.into(),
    }))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
