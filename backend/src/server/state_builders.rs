//! Builders wiring the in-memory stores into domain services and HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::{
    DashboardService, DirectoryLoginService, MatchingService, RequestLedgerService,
    ReviewService, SkillRegistryService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};

use super::ServerConfig;

/// Build the shared HTTP state from the configured stores and policies.
///
/// Each service is constructed once and shared by every worker; the ports it
/// implements are handed out as trait objects.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let stores = &config.stores;

    let matching = Arc::new(MatchingService::new(
        stores.catalog.clone(),
        stores.user_skills.clone(),
        stores.directory.clone(),
        stores.reviews.clone(),
    ));
    let ledger = Arc::new(
        RequestLedgerService::new(
            stores.ledger.clone(),
            stores.user_skills.clone(),
            stores.catalog.clone(),
            stores.directory.clone(),
            config.clock.clone(),
        )
        .with_policy(config.request_policy),
    );
    let registry = Arc::new(
        SkillRegistryService::new(
            stores.user_skills.clone(),
            stores.catalog.clone(),
            stores.directory.clone(),
            config.clock.clone(),
        )
        .with_scope(config.declaration_scope),
    );
    let reviews = Arc::new(ReviewService::new(
        stores.reviews.clone(),
        stores.ledger.clone(),
        stores.directory.clone(),
        config.clock.clone(),
    ));

    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(DirectoryLoginService::new(
            stores.directory.clone(),
            config.login_password.clone(),
        )),
        catalog: matching.clone(),
        browse: matching,
        requests: ledger.clone(),
        requests_query: ledger,
        skills: registry.clone(),
        profile: registry,
        reviews: reviews.clone(),
        reviews_query: reviews,
        dashboard: Arc::new(DashboardService::new(
            stores.user_skills.clone(),
            stores.ledger.clone(),
        )),
    }))
}
