//! PostgreSQL-backed `UserRepository`.
//!
//! Email uniqueness is enforced by a unique index; a violation on insert is
//! reported as `DuplicateEmail` so concurrent registrations cannot both win.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{
    NewUserAccount, PasswordHash, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{User, UserId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: &diesel::result::Error, email: &str) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => UserPersistenceError::duplicate_email(email),
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::ForeignKeyViolation => UserPersistenceError::query("database error"),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: &UserRow) -> Result<User, UserPersistenceError> {
    row.to_user().map_err(|message| {
        warn!(user_id = %row.id, %message, "stored user failed validation");
        UserPersistenceError::query(message)
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &NewUserAccount) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *account.id.as_uuid(),
            name: account.name.as_ref(),
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, account.email.as_ref()))?;
        Ok(account.to_user())
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, email))?;

        row.map(|row| {
            Ok(StoredCredentials {
                user: row_to_user(&row)?,
                password_hash: PasswordHash::new(row.password_hash),
            })
        })
        .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, ""))?;
        row.as_ref().map(row_to_user).transpose()
    }
}
