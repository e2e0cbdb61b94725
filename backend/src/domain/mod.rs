//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed place and user documents, the error
//! contract shared by every adapter, and the services that implement the
//! driving ports. Nothing here knows about HTTP or PostgreSQL.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: the failure payload and its stable category.
//! - `Place`/`User` with their validated field types.
//! - `PlaceLinkageService`: creates and deletes places atomically with the
//!   owner's back-reference.
//! - `PlaceQueryService`, `UserAccountService`: read paths and accounts.

pub mod auth;
pub mod error;
pub mod place;
pub mod place_linkage_service;
pub mod place_query_service;
pub mod ports;
pub(crate) mod repository_errors;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{LoginCredentials, LoginValidationError, SignupDetails};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::place::{
    Address, Coordinates, DEFAULT_PLACE_IMAGE, PLACE_DESCRIPTION_MIN, Place, PlaceDescription,
    PlaceDraft, PlaceId, PlaceTitle, PlaceValidationError,
};
pub use self::place_linkage_service::PlaceLinkageService;
pub use self::place_query_service::PlaceQueryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DEFAULT_USER_IMAGE, EmailAddress, PASSWORD_MIN, Password, USER_NAME_MIN, User, UserId,
    UserName, UserValidationError,
};
pub use self::user_account_service::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use places_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
