//! OpenAPI schemas for domain types with hand-written serialisation.
//!
//! `Booking` and `BookingWithPlace` serialise through a private view, so
//! utoipa cannot derive their shape. These wrappers mirror the JSON and are
//! registered under the domain names.

use utoipa::ToSchema;

use crate::domain::Place;

/// OpenAPI shape of [`crate::domain::Booking`]; `place` is the listing id.
#[derive(ToSchema)]
#[schema(as = Booking)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct BookingSchema {
    #[schema(example = "0b6f5c1e-7d4a-4f3e-9c2b-1a0f9e8d7c6b")]
    id: String,
    #[schema(example = "7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09")]
    place: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user: String,
    #[schema(example = "2024-05-01")]
    check_in: String,
    #[schema(example = "2024-05-04")]
    check_out: String,
    #[schema(example = 2)]
    number_of_guests: u16,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "0123456789")]
    phone: String,
    /// Nights multiplied by the nightly rate at booking time.
    #[schema(example = 360)]
    price: u64,
}

/// OpenAPI shape of [`crate::domain::BookingWithPlace`]: a booking whose
/// `place` is the full listing.
#[derive(ToSchema)]
#[schema(as = BookingWithPlace)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct BookingWithPlaceSchema {
    id: String,
    place: Place,
    user: String,
    check_in: String,
    check_out: String,
    number_of_guests: u16,
    name: String,
    phone: String,
    price: u64,
}
