//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod catalog;
pub mod error;
pub mod health;
pub mod profile;
pub mod requests;
pub mod reviews;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler on the given scope.
///
/// The caller supplies the session middleware, the [`state::HttpState`] and
/// the extractor configs from [`validation`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(catalog::list_categories)
        .service(catalog::browse_skills)
        .service(catalog::list_skills)
        .service(requests::send_request)
        .service(requests::list_requests)
        .service(requests::update_request)
        .service(profile::add_skill)
        .service(profile::get_profile)
        .service(profile::get_dashboard)
        .service(reviews::create_review)
        .service(reviews::member_reviews);
}
