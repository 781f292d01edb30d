//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for accounts, listings and
//! bookings, the identity token and ownership rules that guard them, and the
//! services implementing the driving ports. Nothing here knows about HTTP or
//! SQL; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport agnostic error payload.
//! - `User`, `Place`, `Booking`: aggregates and their identifiers.
//! - `TokenService` / `Identity`: signed identity assertions.
//! - `authorize_owner_action`: the ownership guard.
//! - `AccountService`, `PlaceCatalogService`, `BookingLedgerService`.

pub mod account_service;
pub mod auth;
pub mod authorization;
pub mod booking;
pub mod booking_ledger_service;
pub mod error;
pub mod numeric_input;
pub mod place;
pub mod place_catalog_service;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration,
    RegistrationValidationError,
};
pub use self::authorization::{Authorization, AuthorizationFailure, authorize_owner_action};
pub use self::booking::{
    Booking, BookingId, BookingRequest, BookingValidationError, BookingWithPlace,
    ValidatedBooking,
};
pub use self::booking_ledger_service::BookingLedgerService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::numeric_input::{NumericInput, NumericInputError};
pub use self::place::{
    PRICE_MAX, Perk, Place, PlaceDraft, PlaceFields, PlaceId, PlaceValidationError, StayTime,
};
pub use self::place_catalog_service::PlaceCatalogService;
pub use self::token::{AuthFailure, Identity, TokenIssueError, TokenService};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, USER_NAME_MAX, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use staybook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
