//! Profile, skill declaration and dashboard handlers.
//!
//! ```text
//! POST /api/v1/profile/add-skill/ {"skill_id":1,"can_teach":true,"experience_level":"Advanced"}
//! GET  /api/v1/profile/
//! GET  /api/v1/dashboard/
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{DashboardSummary, DeclareSkillRequest, DeclaredSkill, MemberProfile};
use crate::domain::{Error, ExperienceLevel, SkillId, SkillRole};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Body of `POST /profile/add-skill/`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddSkillBody {
    pub skill_id: Option<u32>,
    /// Defaults to `true` (teaching).
    pub can_teach: Option<bool>,
    /// `Beginner`, `Intermediate` (default) or `Advanced`.
    pub experience_level: Option<String>,
}

/// A skill declaration joined with its catalog entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeclaredSkillDto {
    pub skill_id: u32,
    pub skill_name: String,
    pub category: String,
    pub can_teach: bool,
    pub experience_level: String,
    pub declared_at: String,
}

impl From<DeclaredSkill> for DeclaredSkillDto {
    fn from(value: DeclaredSkill) -> Self {
        let DeclaredSkill { declaration, skill } = value;
        Self {
            skill_id: skill.id().get(),
            skill_name: skill.name().to_owned(),
            category: skill.category_name().to_owned(),
            can_teach: declaration.role().can_teach(),
            experience_level: declaration.experience_level().to_string(),
            declared_at: declaration.declared_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddSkillResponse {
    pub skill: DeclaredSkillDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub location: String,
    pub bio: String,
    pub phone: String,
    pub skills: Vec<DeclaredSkillDto>,
}

impl From<MemberProfile> for ProfileResponse {
    fn from(value: MemberProfile) -> Self {
        let MemberProfile { member, skills } = value;
        Self {
            id: member.id().to_string(),
            username: member.username().to_string(),
            email: member.email().to_owned(),
            location: member.location().to_owned(),
            bio: member.bio().to_owned(),
            phone: member.phone().to_owned(),
            skills: skills.into_iter().map(DeclaredSkillDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_skills: usize,
    pub teaching_skills: usize,
    pub learning_skills: usize,
    pub pending_received: usize,
    pub completed_swaps: usize,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(value: DashboardSummary) -> Self {
        Self {
            total_skills: value.total_skills,
            teaching_skills: value.teaching_skills,
            learning_skills: value.learning_skills,
            pending_received: value.pending_received,
            completed_swaps: value.completed_swaps,
        }
    }
}

fn parse_add_skill(body: AddSkillBody) -> ApiResult<DeclareSkillRequest> {
    let skill_id = body
        .skill_id
        .ok_or_else(|| missing_field_error(FieldName::new("skill_id")))?;
    let experience_level = match body.experience_level.as_deref().map(str::trim) {
        None | Some("") => ExperienceLevel::default(),
        Some(raw) => ExperienceLevel::from_str(raw).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "experience_level",
                "value": raw,
                "code": "invalid_experience_level",
            }))
        })?,
    };
    Ok(DeclareSkillRequest {
        skill_id: SkillId::new(skill_id),
        role: SkillRole::from_can_teach(body.can_teach.unwrap_or(true)),
        experience_level,
    })
}

/// Declare a skill the current member teaches or wants to learn.
#[utoipa::path(
    post,
    path = "/api/v1/profile/add-skill/",
    request_body = AddSkillBody,
    responses(
        (status = 201, description = "Declaration stored", body = AddSkillResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown skill", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "addSkill"
)]
#[post("/profile/add-skill/")]
pub async fn add_skill(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddSkillBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let request = parse_add_skill(payload.into_inner())?;
    let declared = state.skills.declare(&actor, request).await?;
    Ok(HttpResponse::Created().json(AddSkillResponse {
        skill: declared.into(),
    }))
}

/// The current member's display fields and declared skills.
#[utoipa::path(
    get,
    path = "/api/v1/profile/",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Member no longer exists", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile/")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let actor = session.require_user_id()?;
    let profile = state.profile.profile(&actor).await?;
    Ok(web::Json(profile.into()))
}

/// Declaration and exchange counts for the current member.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getDashboard"
)]
#[get("/dashboard/")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let actor = session.require_user_id()?;
    let summary = state.dashboard.summary(&actor).await?;
    Ok(web::Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, UserId};
    use crate::inbound::http::auth::{LoginRequest, login};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn get_as_member(mut ports: MockPorts, uri: &str) -> (StatusCode, Value) {
        ports
            .login
            .expect_authenticate()
            .returning(|_| Ok(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id")));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/v1")
                        .service(login)
                        .service(get_profile)
                        .service(get_dashboard),
                ),
        )
        .await;
        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/login/")
                .set_json(&LoginRequest {
                    username: "alice".into(),
                    password: "demo123".into(),
                })
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&login_res);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[actix_web::test]
    async fn dashboard_renders_counts() {
        let mut ports = MockPorts::default();
        ports.dashboard.expect_summary().times(1).returning(|_| {
            Ok(DashboardSummary {
                total_skills: 3,
                teaching_skills: 2,
                learning_skills: 1,
                pending_received: 4,
                completed_swaps: 1,
            })
        });

        let (status, body) = get_as_member(ports, "/api/v1/dashboard/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["teaching_skills"], 2);
        assert_eq!(body["pending_received"], 4);
        assert_eq!(body["completed_swaps"], 1);
    }

    #[actix_web::test]
    async fn missing_member_profile_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .profile
            .expect_profile()
            .returning(|_| Err(Error::not_found("member not found")));

        let (status, body) = get_as_member(ports, "/api/v1/profile/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    fn add_skill_defaults_to_teaching_intermediate() {
        let parsed = parse_add_skill(AddSkillBody {
            skill_id: Some(4),
            ..AddSkillBody::default()
        })
        .expect("valid body");
        assert_eq!(parsed.skill_id, SkillId::new(4));
        assert_eq!(parsed.role, SkillRole::Teaches);
        assert_eq!(parsed.experience_level, ExperienceLevel::Intermediate);
    }

    #[rstest]
    #[case(Some(false), Some("advanced"), SkillRole::Learns, ExperienceLevel::Advanced)]
    #[case(Some(true), Some(" "), SkillRole::Teaches, ExperienceLevel::Intermediate)]
    fn add_skill_reads_role_and_level(
        #[case] can_teach: Option<bool>,
        #[case] level: Option<&str>,
        #[case] role: SkillRole,
        #[case] expected_level: ExperienceLevel,
    ) {
        let parsed = parse_add_skill(AddSkillBody {
            skill_id: Some(1),
            can_teach,
            experience_level: level.map(str::to_owned),
        })
        .expect("valid body");
        assert_eq!(parsed.role, role);
        assert_eq!(parsed.experience_level, expected_level);
    }

    #[rstest]
    fn missing_skill_id_is_rejected() {
        let err = parse_add_skill(AddSkillBody::default()).expect_err("missing skill");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["field"], "skill_id");
    }

    #[rstest]
    fn unknown_level_is_rejected() {
        let err = parse_add_skill(AddSkillBody {
            skill_id: Some(1),
            can_teach: None,
            experience_level: Some("guru".to_owned()),
        })
        .expect_err("unknown level");
        assert_eq!(
            err.details().expect("details")["code"],
            "invalid_experience_level"
        );
    }
}
