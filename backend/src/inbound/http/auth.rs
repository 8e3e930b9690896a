//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/auth/login/ {"username":"alice","password":"demo123"}
//! POST /api/v1/auth/logout/
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned on successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user_id: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a member and start a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "member logged in");
    Ok(web::Json(LoginResponse {
        user_id: user_id.to_string(),
    }))
}

/// End the current session. Succeeds even without one.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout/",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout/")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    const ALICE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn ports_accepting(password: &'static str) -> MockPorts {
        let mut ports = MockPorts::default();
        ports.login.expect_authenticate().returning(move |creds| {
            if creds.password() == password {
                Ok(UserId::new(ALICE).expect("fixture id"))
            } else {
                Err(Error::unauthorized("invalid credentials"))
            }
        });
        ports
    }

    async fn post_login(
        ports: MockPorts,
        username: &str,
        password: &str,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").service(login).service(logout)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login/")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[actix_web::test]
    async fn login_sets_session_cookie() {
        let res = post_login(ports_accepting("demo123"), "alice", "demo123").await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        assert!(!cookie.value().is_empty());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["user_id"], ALICE);
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let res = post_login(ports_accepting("demo123"), "alice", "nope").await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[rstest]
    #[case("  ", "demo123", "username")]
    #[case("alice", "", "password")]
    #[actix_web::test]
    async fn blank_fields_are_rejected_before_authentication(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.login.expect_authenticate().never();
        let res = post_login(ports, username, password).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn logout_without_session_is_no_content() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .service(web::scope("/api/v1").service(logout)),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/logout/")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
