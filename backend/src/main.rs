//! Backend entry-point: loads settings, seeds the stores and serves the API.

use actix_web::web;
use mockable::{Clock, DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::demo_data::seed_demo_data;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::memory::MemoryStores;
use backend::settings::AppSettings;

mod server;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let request_policy = settings.request_policy().map_err(std::io::Error::other)?;
    let declaration_scope = settings.declaration_scope().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let stores = MemoryStores::new();
    if settings.demo_data {
        seed_demo_data(&stores, DefaultClock.utc())
            .await
            .map_err(std::io::Error::other)?;
    } else {
        info!(reason = "disabled", "demo data seeding skipped");
    }

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_stores(stores)
    .with_request_policy(request_policy)
    .with_declaration_scope(declaration_scope)
    .with_login_password(settings.demo_password());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}

#[cfg(test)]
mod tests;
