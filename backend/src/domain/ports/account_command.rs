//! Driving port for account registration and login.
//!
//! Inbound adapters call this port with already validated payloads; the
//! implementation owns hashing, lookups and the error taxonomy clients see.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

/// Account use-cases that change or check credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Duplicate emails are `unprocessable_entity`.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Check credentials.
    ///
    /// An unknown email is `not_found`; a wrong password is
    /// `unprocessable_entity`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
