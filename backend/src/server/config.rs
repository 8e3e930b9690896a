//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use backend::domain::{DeclarationScope, RequestPolicy};
use backend::outbound::memory::MemoryStores;
use mockable::{Clock, DefaultClock};

const DEFAULT_LOGIN_PASSWORD: &str = "demo123";

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) stores: MemoryStores,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) request_policy: RequestPolicy,
    pub(crate) declaration_scope: DeclarationScope,
    pub(crate) login_password: String,
}

impl ServerConfig {
    /// Construct a server configuration with empty stores and default
    /// ledger policies.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            stores: MemoryStores::new(),
            clock: Arc::new(DefaultClock),
            request_policy: RequestPolicy::default(),
            declaration_scope: DeclarationScope::default(),
            login_password: DEFAULT_LOGIN_PASSWORD.to_owned(),
        }
    }

    /// Serve from pre-populated stores.
    #[must_use]
    pub fn with_stores(mut self, stores: MemoryStores) -> Self {
        self.stores = stores;
        self
    }

    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Exercised by integration tests with a fixed clock")
    )]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_request_policy(mut self, policy: RequestPolicy) -> Self {
        self.request_policy = policy;
        self
    }

    #[must_use]
    pub fn with_declaration_scope(mut self, scope: DeclarationScope) -> Self {
        self.declaration_scope = scope;
        self
    }

    /// Shared password every directory member logs in with.
    #[must_use]
    pub fn with_login_password(mut self, password: impl Into<String>) -> Self {
        self.login_password = password.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
