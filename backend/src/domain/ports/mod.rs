//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`AccountCommand`, `UserProfileQuery`, `PlaceCatalog`,
//! `BookingLedger`) are what inbound adapters call. Driven ports
//! (`UserRepository`, `PasswordHasher`, `PlaceRepository`,
//! `BookingRepository`) are what the domain services call out to.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod booking_ledger;
mod booking_repository;
mod password_hasher;
mod place_catalog;
mod place_repository;
mod user_profile_query;
mod user_repository;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use booking_ledger::BookingLedger;
#[cfg(test)]
pub use booking_ledger::MockBookingLedger;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHash, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use place_catalog::MockPlaceCatalog;
pub use place_catalog::PlaceCatalog;
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{PlaceRepository, PlaceRepositoryError};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    NewUserAccount, StoredCredentials, UserPersistenceError, UserRepository,
};
