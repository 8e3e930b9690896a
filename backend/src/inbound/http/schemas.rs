//! OpenAPI schemas for domain types that stay free of `utoipa` derives.
//!
//! The wrappers mirror the serialised shape of their domain counterparts and
//! are registered under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed body or query, or a rejected exchange request.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No session or wrong credentials.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The actor may not take this transition.
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// The request is not in a state that allows the transition.
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    #[schema(example = "cannot move a request from completed to rejected")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Machine-readable context such as `reason` or `field`.
    #[schema(value_type = Object, example = json!({"reason": "invalid_transition"}))]
    details: Option<serde_json::Value>,
}
