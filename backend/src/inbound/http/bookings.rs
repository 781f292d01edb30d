//! Booking ledger handlers.
//!
//! ```text
//! POST /bookings {"place":"<uuid>","checkIn":"2024-05-01","checkOut":"2024-05-04",
//!                 "numberOfGuests":2,"name":"Ada","phone":"0123456789","price":360}
//! GET  /bookings
//! ```
//!
//! The booking's user always comes from the identity cookie and its price is
//! recomputed from the listing; the client's `price` is only a hint.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Booking, BookingRequest, BookingWithPlace, Error, NumericInput};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedIdentity;
use crate::inbound::http::schemas::{BookingSchema, BookingWithPlaceSchema};
use crate::inbound::http::state::HttpState;

/// Reservation body for `POST /bookings`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingBody {
    #[schema(example = "7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09")]
    pub place: Option<String>,
    #[schema(example = "2024-05-01")]
    pub check_in: Option<String>,
    #[schema(example = "2024-05-04")]
    pub check_out: Option<String>,
    #[schema(value_type = Option<i64>, example = 2)]
    pub number_of_guests: Option<NumericInput>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "0123456789")]
    pub phone: Option<String>,
    /// Client-side estimate; the server recomputes the total.
    #[schema(value_type = Option<i64>, example = 360)]
    pub price: Option<NumericInput>,
}

impl From<BookingBody> for BookingRequest {
    fn from(body: BookingBody) -> Self {
        Self {
            place: body.place,
            check_in: body.check_in,
            check_out: body.check_out,
            number_of_guests: body.number_of_guests,
            name: body.name,
            phone: body.phone,
            price: body.price,
        }
    }
}

/// Reserve a listing for the caller.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingBody,
    responses(
        (status = 200, description = "Booking recorded", body = BookingSchema),
        (status = 400, description = "Invalid dates, guests, contact or place id", body = Error),
        (status = 401, description = "Identity cookie missing or invalid", body = Error),
        (status = 404, description = "Listing not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking",
    security(("IdentityCookie" = []))
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<BookingBody>,
) -> ApiResult<web::Json<Booking>> {
    let request = BookingRequest::from(payload.into_inner());
    let booking = state.bookings.create_booking(&identity, &request).await?;
    Ok(web::Json(booking))
}

/// The caller's bookings, each with its listing embedded.
#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "Caller's bookings", body = [BookingWithPlaceSchema]),
        (status = 401, description = "Identity cookie missing or invalid", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listBookings",
    security(("IdentityCookie" = []))
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
) -> ApiResult<web::Json<Vec<BookingWithPlace>>> {
    Ok(web::Json(
        state.bookings.list_bookings_for_user(&identity).await?,
    ))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
