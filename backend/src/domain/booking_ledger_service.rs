//! Booking ledger domain service.
//!
//! Validates reservation requests, prices them from the stored nightly rate
//! and writes exactly one record per accepted booking. The booking's user is
//! always the caller's identity.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    BookingLedger, BookingRepository, BookingRepositoryError, PlaceRepository,
    PlaceRepositoryError,
};
use crate::domain::{
    Booking, BookingId, BookingRequest, BookingValidationError, BookingWithPlace, Error,
    Identity, ValidatedBooking,
};

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

fn map_place_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("place repository unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } => {
            Error::internal(format!("place repository error: {message}"))
        }
    }
}

/// Convert a validation failure into the `{field, code}` error clients see.
pub(crate) fn map_validation_error(error: BookingValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

/// Ledger service over booking and place repositories.
#[derive(Clone)]
pub struct BookingLedgerService<B: ?Sized, P: ?Sized> {
    bookings: Arc<B>,
    places: Arc<P>,
}

impl<B: ?Sized, P: ?Sized> BookingLedgerService<B, P> {
    pub fn new(bookings: Arc<B>, places: Arc<P>) -> Self {
        Self { bookings, places }
    }
}

#[async_trait]
impl<B, P> BookingLedger for BookingLedgerService<B, P>
where
    B: BookingRepository + ?Sized,
    P: PlaceRepository + ?Sized,
{
    async fn create_booking(
        &self,
        identity: &Identity,
        request: &BookingRequest,
    ) -> Result<Booking, Error> {
        let validated = ValidatedBooking::try_from_request(request).map_err(map_validation_error)?;

        let place_id = validated.place();
        let place = self
            .places
            .find_by_id(place_id)
            .await
            .map_err(map_place_error)?
            .ok_or_else(|| Error::not_found(format!("place {place_id} not found")))?;

        let nights = validated.nights();
        let total = validated
            .total_price(place.fields().price())
            .map_err(map_validation_error)?;
        let declared = validated.declared_price();
        if declared.is_some_and(|value| u64::try_from(value).ok() != Some(total)) {
            debug!(%place_id, ?declared, total, "ignoring client-declared booking price");
        }

        let booking = validated.into_booking(BookingId::random(), identity.id().clone(), total);
        self.bookings
            .insert(&booking)
            .await
            .map_err(map_booking_error)?;
        info!(booking_id = %booking.id(), %place_id, nights, total, "created booking");
        Ok(booking)
    }

    async fn list_bookings_for_user(
        &self,
        identity: &Identity,
    ) -> Result<Vec<BookingWithPlace>, Error> {
        self.bookings
            .list_for_user(identity.id())
            .await
            .map_err(map_booking_error)
    }
}

#[cfg(test)]
#[path = "booking_ledger_service_tests.rs"]
mod tests;
