//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    MockCatalogQuery, MockDashboardQuery, MockExchangeRequestCommand, MockExchangeRequestQuery,
    MockLoginService, MockProfileQuery, MockReviewCommand, MockReviewQuery, MockSkillBrowseQuery,
    MockSkillRegistryCommand,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Session middleware with a fresh key, a `session` cookie and no `Secure`
/// flag so plain-HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// One mock per driving port. Tests set expectations on the ports they
/// exercise and leave the rest untouched.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub catalog: MockCatalogQuery,
    pub browse: MockSkillBrowseQuery,
    pub requests: MockExchangeRequestCommand,
    pub requests_query: MockExchangeRequestQuery,
    pub skills: MockSkillRegistryCommand,
    pub profile: MockProfileQuery,
    pub reviews: MockReviewCommand,
    pub reviews_query: MockReviewQuery,
    pub dashboard: MockDashboardQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            catalog: Arc::new(self.catalog),
            browse: Arc::new(self.browse),
            requests: Arc::new(self.requests),
            requests_query: Arc::new(self.requests_query),
            skills: Arc::new(self.skills),
            profile: Arc::new(self.profile),
            reviews: Arc::new(self.reviews),
            reviews_query: Arc::new(self.reviews_query),
            dashboard: Arc::new(self.dashboard),
        })
    }
}
