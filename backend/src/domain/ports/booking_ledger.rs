//! Driving port for creating and listing a guest's bookings.

use async_trait::async_trait;

use crate::domain::{Booking, BookingRequest, BookingWithPlace, Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// Validate, price and store a booking for `identity`.
    ///
    /// Validation failures are `invalid_request` with `{field, code}`
    /// details; an unknown place is `not_found`.
    async fn create_booking(
        &self,
        identity: &Identity,
        request: &BookingRequest,
    ) -> Result<Booking, Error>;

    /// Every booking made by `identity`, each with its place.
    async fn list_bookings_for_user(
        &self,
        identity: &Identity,
    ) -> Result<Vec<BookingWithPlace>, Error>;
}
