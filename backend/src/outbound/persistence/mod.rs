//! PostgreSQL adapters for the repository ports.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain types and hold no business rules. Connections come from a shared
//! `bb8` pool via `diesel-async`.
//!
//! ```no_run
//! use staybook::outbound::persistence::{DbPool, DieselPlaceRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), staybook::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/staybook")).await?;
//! let places = DieselPlaceRepository::new(pool);
//! # let _ = places;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_booking_repository;
mod diesel_place_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_place_repository::DieselPlaceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
