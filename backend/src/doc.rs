//! OpenAPI document for the HTTP API.
//!
//! Registers every handler path, the request and response schemas, and the
//! `IdentityCookie` security scheme describing the signed `token` cookie.
//! Swagger UI serves it under `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Perk, Place, User};
use crate::inbound::http::bookings::BookingBody;
use crate::inbound::http::identity::TOKEN_COOKIE;
use crate::inbound::http::places::PlaceBody;
use crate::inbound::http::schemas::{BookingSchema, BookingWithPlaceSchema};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// Name of the cookie security scheme referenced by protected paths.
pub const IDENTITY_SECURITY_SCHEME: &str = "IdentityCookie";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            IDENTITY_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                TOKEN_COOKIE,
                "Signed identity token issued by POST /login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Staybook API",
        description = "Accounts, place listings and bookings behind a signed identity cookie."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::profile,
        crate::inbound::http::users::logout,
        crate::inbound::http::places::create_place,
        crate::inbound::http::places::update_place,
        crate::inbound::http::places::get_place,
        crate::inbound::http::places::list_places,
        crate::inbound::http::places::list_user_places,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Place,
        Perk,
        Error,
        ErrorCode,
        BookingSchema,
        BookingWithPlaceSchema,
        RegisterRequest,
        LoginRequest,
        PlaceBody,
        BookingBody,
    )),
    tags(
        (name = "users", description = "Registration, login and profile"),
        (name = "places", description = "Listings and their owners"),
        (name = "bookings", description = "Reservations made by the caller"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
