//! Driving port for listing reads and owner-scoped writes.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Place, PlaceFields, PlaceId, UserId};

/// Place catalog use-cases.
///
/// Writes take the caller's verified [`Identity`]; the implementation decides
/// ownership, so adapters never compare user ids themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceCatalog: Send + Sync {
    /// Owner of `place_id`, or `not_found`.
    async fn find_owner(&self, place_id: PlaceId) -> Result<UserId, Error>;

    /// Create a listing owned by `identity`.
    async fn create_with_owner(
        &self,
        identity: &Identity,
        fields: PlaceFields,
    ) -> Result<Place, Error>;

    /// Replace a listing's fields when `identity` owns it.
    ///
    /// `not_found` when the place does not exist, `forbidden` when another
    /// user owns it. A rejected update leaves the listing untouched.
    async fn update_if_owner(
        &self,
        identity: &Identity,
        place_id: PlaceId,
        fields: PlaceFields,
    ) -> Result<Place, Error>;

    async fn get_place(&self, place_id: PlaceId) -> Result<Place, Error>;

    async fn list_places(&self) -> Result<Vec<Place>, Error>;

    /// Listings owned by the caller.
    async fn list_places_for_owner(&self, identity: &Identity) -> Result<Vec<Place>, Error>;
}
