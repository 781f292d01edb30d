//! Credential store port: user records plus their password hashes.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId, UserName};

use super::{PasswordHash, define_port_error};

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Everything needed to create an account. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

impl NewUserAccount {
    /// Public view of the account once stored.
    pub fn to_user(&self) -> User {
        User::new(self.id.clone(), self.name.clone(), self.email.clone())
    }
}

/// A stored user together with the hash used to check their password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, account: &NewUserAccount) -> Result<User, UserPersistenceError>;

    /// Look up an account and its hash by normalised email.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
