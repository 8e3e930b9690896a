//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against mocks without touching storage.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogQuery, DashboardQuery, ExchangeRequestCommand, ExchangeRequestQuery, LoginService,
    ProfileQuery, ReviewCommand, ReviewQuery, SkillBrowseQuery, SkillRegistryCommand,
};

/// Parameter object bundling every port implementation used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub browse: Arc<dyn SkillBrowseQuery>,
    pub requests: Arc<dyn ExchangeRequestCommand>,
    pub requests_query: Arc<dyn ExchangeRequestQuery>,
    pub skills: Arc<dyn SkillRegistryCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub catalog: Arc<dyn CatalogQuery>,
    pub browse: Arc<dyn SkillBrowseQuery>,
    pub requests: Arc<dyn ExchangeRequestCommand>,
    pub requests_query: Arc<dyn ExchangeRequestQuery>,
    pub skills: Arc<dyn SkillRegistryCommand>,
    pub profile: Arc<dyn ProfileQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            catalog,
            browse,
            requests,
            requests_query,
            skills,
            profile,
            reviews,
            reviews_query,
            dashboard,
        } = ports;
        Self {
            login,
            catalog,
            browse,
            requests,
            requests_query,
            skills,
            profile,
            reviews,
            reviews_query,
            dashboard,
        }
    }
}
