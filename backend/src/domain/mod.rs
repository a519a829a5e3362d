//! Domain primitives, services and ports.
//!
//! Purpose: define the volunteer board's entities and use-cases without any
//! knowledge of HTTP, WebSockets or SQL. Inbound adapters call the driving
//! ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error, ErrorCode: transport-agnostic failure payload.
//! - Opportunity, Application, Account: stored entities.
//! - OpportunityForm: dashboard form state (record plus create/edit mode).
//! - AccountService, OpportunityBoardService, DashboardService: use-cases.
//! - SessionEventBus: per-browser session change fan-out.

pub mod account;
pub mod account_service;
pub mod application;
pub mod auth;
pub mod dashboard_service;
pub mod error;
pub mod landing;
pub mod notices;
pub mod opportunity;
pub mod opportunity_board_service;
pub mod opportunity_form;
mod opportunity_service_support;
pub mod pages;
pub mod ports;
pub mod session_events;
pub mod shell;
pub mod trace_id;
pub mod user;

pub use self::account::{Account, NewAccount, PasswordHash};
pub use self::account_service::AccountService;
pub use self::application::{
    Application, ApplicationId, ApplicationStatus, ApplicationWithOpportunity, NewApplication,
    UnknownApplicationStatus,
};
pub use self::auth::{
    AuthValidationError, ClientId, Credentials, PASSWORD_MIN_LEN, Session, SessionChange,
    SessionUser, SignUpDetails, SignUpOutcome, VerificationToken,
};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode};
pub use self::opportunity::{
    BadgeTone, Category, DEFAULT_EMOJI, NewOpportunity, Opportunity, OpportunityDraft,
    OpportunityFields, OpportunityId, OpportunityValidationError, PeopleNeeded,
};
pub use self::opportunity_board_service::OpportunityBoardService;
pub use self::opportunity_form::{FormMode, OpportunityForm};
pub use self::session_events::{SessionEventBus, SessionSubscription};
pub use self::shell::{FOOTER, FooterView, HeaderView, NavLink};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, EmailAddress, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use community::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
