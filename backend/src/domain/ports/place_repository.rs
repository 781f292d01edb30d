//! Port for listing persistence.

use async_trait::async_trait;

use crate::domain::{Place, PlaceId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by place repository adapters.
    pub enum PlaceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "place repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "place repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Store a new listing.
    async fn insert(&self, place: &Place) -> Result<(), PlaceRepositoryError>;

    /// Overwrite the listing's fields where both id and owner match.
    ///
    /// Returns `false` when no row matched, leaving storage unchanged.
    async fn update_owned(&self, place: &Place) -> Result<bool, PlaceRepositoryError>;

    async fn find_by_id(&self, id: PlaceId) -> Result<Option<Place>, PlaceRepositoryError>;

    /// Every listing, oldest first.
    async fn list_all(&self) -> Result<Vec<Place>, PlaceRepositoryError>;

    /// Listings owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Place>, PlaceRepositoryError>;
}
