//! Shared HTTP harness for integration suites: an app wired exactly like the
//! server, seeded with the demo data, plus login and JSON call helpers.

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use backend::inbound::http::auth::LoginRequest;
use backend::inbound::http::configure;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::validation::{json_config, query_config};
use serde_json::Value;

pub const DEMO_PASSWORD: &str = "demo123";

/// Build the `/api/v1` app around prepared state.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build();

    actix_test::init_service(
        App::new().app_data(state).wrap(backend::Trace).service(
            web::scope("/api/v1")
                .wrap(session)
                .app_data(json_config())
                .app_data(query_config())
                .configure(configure),
        ),
    )
    .await
}

/// Status and parsed JSON body (`Value::Null` when the body is empty).
pub async fn call<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, request.to_request()).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Log in as a demo member and return the session cookie with the user id.
pub async fn login<S>(app: &S, username: &str) -> (Cookie<'static>, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login/")
            .set_json(&LoginRequest {
                username: username.to_owned(),
                password: DEMO_PASSWORD.to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login for {username}");
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();
    let body: Value = actix_test::read_body_json(res).await;
    let user_id = body["user_id"].as_str().expect("user id").to_owned();
    (cookie, user_id)
}
