//! Driving port for reading the signed-in user's profile.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Load the profile for `user_id`, or `None` when the account is gone.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error>;
}
