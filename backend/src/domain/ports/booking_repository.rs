//! Port for the booking ledger's durable store.

use async_trait::async_trait;

use crate::domain::{Booking, BookingWithPlace, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist one booking. Either the whole record is written or nothing is.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Bookings made by `user`, each joined with its place, in insertion order.
    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<BookingWithPlace>, BookingRepositoryError>;
}
