//! Domain model, state machine and services.
//!
//! Purpose: keep every rule about skills, declarations and exchange requests
//! independent of HTTP and storage. Inbound adapters reach this module only
//! through the driving ports in [`ports`]; outbound adapters implement its
//! driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - ExchangeRequest / RequestStatus / ExchangeError: the request lifecycle.
//! - MatchingService, RequestLedgerService, SkillRegistryService,
//!   ReviewService, DashboardService, DirectoryLoginService: use-case
//!   implementations of the driving ports.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod exchange_request;
pub mod login;
pub mod matching;
pub mod member;
pub mod ports;
pub mod request_ledger;
pub mod review;
pub mod reviews;
pub mod skill_registry;
pub mod trace_id;
pub mod user_skill;

pub use self::catalog::{Category, CategoryId, Skill, SkillDraft, SkillFilter, SkillId};
pub use self::dashboard::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::exchange_request::{
    DEFAULT_MESSAGE_MAX_CHARS, EdgeActor, ExchangeError, ExchangeRequest, NewExchangeRequest,
    ParseRequestStatusError, Party, RequestId, RequestMessage, RequestStatus,
};
pub use self::login::DirectoryLoginService;
pub use self::matching::{BrowseFilters, MatchingService, SkillListing, TeacherEntry};
pub use self::member::{
    LoginCredentials, LoginValidationError, Member, MemberDraft, MemberValidationError, UserId,
    Username,
};
pub use self::request_ledger::{
    DuplicateRequestPolicy, ParseDuplicatePolicyError, RequestLedgerService, RequestPolicy,
};
pub use self::review::{
    Rating, RatingOutOfRange, RatingSummary, Review, ReviewDraft, ReviewId,
};
pub use self::reviews::ReviewService;
pub use self::skill_registry::SkillRegistryService;
pub use self::trace_id::TraceId;
pub use self::user_skill::{
    DeclarationScope, ExperienceLevel, ParseDeclarationScopeError, ParseExperienceLevelError,
    SkillRole, UserSkill,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
