//! Tests for the backend application bootstrap, covering readiness signalling.

use super::server::{ServerConfig, create_server};
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use backend::inbound::http::health::HealthState;
use rstest::{fixture, rstest};
use std::net::SocketAddr;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn server_config() -> ServerConfig {
    ServerConfig::new(
        Key::generate(),
        false,
        SameSite::Lax,
        SocketAddr::from(([127, 0, 0, 1], 0)),
    )
}

#[rstest]
fn config_keeps_bind_address(server_config: ServerConfig) {
    assert_eq!(
        server_config.bind_addr(),
        SocketAddr::from(([127, 0, 0, 1], 0))
    );
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server =
        create_server(health_state.clone(), server_config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}
