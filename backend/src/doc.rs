//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every `/api/v1` handler plus the health probes
//! - **Schemas**: request and response DTOs, and the [`ErrorSchema`] /
//!   [`ErrorCodeSchema`] wrappers that describe the domain error without
//!   coupling domain types to utoipa
//! - **Security**: session cookie authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::catalog::{
    BrowseResponse, CategoriesResponse, CategoryDto, SkillDto, SkillListingDto, SkillsResponse,
    TeacherDto,
};
use crate::inbound::http::profile::{
    AddSkillBody, AddSkillResponse, DashboardResponse, DeclaredSkillDto, ProfileResponse,
};
use crate::inbound::http::requests::{
    ExchangeRequestDto, RequestEnvelope, RequestListsResponse, SendRequestBody, UpdateStatusBody,
};
use crate::inbound::http::reviews::{
    CreateReviewBody, MemberReviewsResponse, ReceivedReviewDto, ReviewDto, ReviewEnvelope,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SkillSwap backend API",
        description = "Skill catalogue, teacher matching and exchange request lifecycle.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::catalog::list_categories,
        crate::inbound::http::catalog::list_skills,
        crate::inbound::http::catalog::browse_skills,
        crate::inbound::http::requests::send_request,
        crate::inbound::http::requests::list_requests,
        crate::inbound::http::requests::update_request,
        crate::inbound::http::profile::add_skill,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::get_dashboard,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::member_reviews,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        LoginResponse,
        CategoryDto,
        CategoriesResponse,
        SkillDto,
        SkillsResponse,
        TeacherDto,
        SkillListingDto,
        BrowseResponse,
        SendRequestBody,
        UpdateStatusBody,
        ExchangeRequestDto,
        RequestEnvelope,
        RequestListsResponse,
        AddSkillBody,
        AddSkillResponse,
        DeclaredSkillDto,
        ProfileResponse,
        DashboardResponse,
        CreateReviewBody,
        ReviewDto,
        ReviewEnvelope,
        ReceivedReviewDto,
        MemberReviewsResponse,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "catalog", description = "Skill catalogue and teacher browsing"),
        (name = "requests", description = "Exchange request lifecycle"),
        (name = "profile", description = "Skill declarations and dashboard"),
        (name = "reviews", description = "Reviews of completed exchanges"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_request_schema_has_party_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get("ExchangeRequestDto").expect("request schema");

        for field in ["from_username", "to_username", "requested_skill_name", "status"] {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/api/v1/requests/send/")]
    #[case("/api/v1/requests/{id}/update/")]
    #[case("/api/v1/skills/browse/")]
    #[case("/api/v1/reviews/user/{user_id}/")]
    #[case("/health/ready")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
