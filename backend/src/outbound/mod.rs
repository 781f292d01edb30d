//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel.
//! - **memory**: process-local repositories for running without a database.
//! - **security**: Argon2id password hashing.

pub mod memory;
pub mod persistence;
pub mod security;
