//! PostgreSQL-backed `BookingRepository`.
//!
//! A booking is a single-row insert, so the write is atomic without an
//! explicit transaction. Listing joins each booking with its place in one
//! query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingWithPlace, UserId};

use super::diesel_basic_error_mapping::map_basic_diesel_error;
use super::models::{BookingRow, NewBookingRow, PlaceRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, places};

/// Diesel implementation of the booking ledger store.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    BookingRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        &error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let row = NewBookingRow::from_booking(booking).map_err(BookingRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(bookings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<BookingWithPlace>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(BookingRow, PlaceRow)> = bookings::table
            .inner_join(places::table)
            .filter(bookings::user_id.eq(user.as_uuid()))
            .order(bookings::created_at.asc())
            .select((BookingRow::as_select(), PlaceRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(booking, place)| {
                let booking = booking.into_booking().map_err(BookingRepositoryError::query)?;
                let place = place.into_place().map_err(BookingRepositoryError::query)?;
                Ok(BookingWithPlace::new(booking, place))
            })
            .collect()
    }
}
