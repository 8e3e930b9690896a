//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are what inbound
//! adapters call and return [`crate::domain::Error`]. Driven ports
//! (`*Repository`, [`MemberDirectory`]) are implemented by outbound adapters
//! and return their own typed errors, which convert into the domain error.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_query;
mod catalog_repository;
mod dashboard_query;
mod exchange_request_command;
mod exchange_request_query;
mod exchange_request_repository;
mod login_service;
mod member_directory;
mod profile_query;
mod review_command;
mod review_query;
mod review_repository;
mod skill_browse_query;
mod skill_registry_command;
mod user_skill_repository;

pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, DashboardSummary};
#[cfg(test)]
pub use exchange_request_command::MockExchangeRequestCommand;
pub use exchange_request_command::{CreateExchangeRequest, ExchangeRequestCommand};
#[cfg(test)]
pub use exchange_request_query::MockExchangeRequestQuery;
pub use exchange_request_query::{
    ExchangeRequestQuery, ExchangeRequestView, PartyRef, RequestLists, SkillRef,
};
#[cfg(test)]
pub use exchange_request_repository::MockExchangeRequestRepository;
pub use exchange_request_repository::{
    CasOutcome, ExchangeRequestRepository, ExchangeRequestRepositoryError, InsertOutcome,
};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use member_directory::{MemberDirectory, MemberDirectoryError};
#[cfg(test)]
pub use member_directory::MockMemberDirectory;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{MemberProfile, ProfileQuery};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{CreateReviewRequest, ReviewCommand};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::{MemberReviews, ReceivedReview, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use skill_browse_query::MockSkillBrowseQuery;
pub use skill_browse_query::SkillBrowseQuery;
#[cfg(test)]
pub use skill_registry_command::MockSkillRegistryCommand;
pub use skill_registry_command::{DeclareSkillRequest, DeclaredSkill, SkillRegistryCommand};
#[cfg(test)]
pub use user_skill_repository::MockUserSkillRepository;
pub use user_skill_repository::{UserSkillRepository, UserSkillRepositoryError};
