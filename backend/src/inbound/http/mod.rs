//! HTTP inbound adapter: JSON endpoints for accounts, listings and bookings.

pub mod bookings;
pub mod error;
pub mod health;
pub mod identity;
pub mod identity_config;
pub mod places;
pub mod routes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
