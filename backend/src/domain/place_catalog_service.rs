//! Place catalog domain service.
//!
//! Owns the ownership rule for listing updates: the stored owner is compared
//! with the caller's identity before anything is written, and the repository
//! scopes its update by owner as well.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{PlaceCatalog, PlaceRepository, PlaceRepositoryError};
use crate::domain::{
    AuthorizationFailure, Error, Identity, Place, PlaceFields, PlaceId, UserId,
    authorize_owner_action,
};

fn map_repository_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("place repository unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } => {
            Error::internal(format!("place repository error: {message}"))
        }
    }
}

fn place_not_found(place_id: PlaceId) -> Error {
    Error::not_found(format!("place {place_id} not found"))
}

fn map_authorization_failure(failure: AuthorizationFailure) -> Error {
    match failure {
        AuthorizationFailure::NotOwner => Error::forbidden(failure.to_string()),
    }
}

/// Catalog service over a [`PlaceRepository`].
#[derive(Clone)]
pub struct PlaceCatalogService<R: ?Sized> {
    places: Arc<R>,
}

impl<R: ?Sized> PlaceCatalogService<R> {
    pub fn new(places: Arc<R>) -> Self {
        Self { places }
    }
}

impl<R: PlaceRepository + ?Sized> PlaceCatalogService<R> {
    async fn load(&self, place_id: PlaceId) -> Result<Place, Error> {
        self.places
            .find_by_id(place_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| place_not_found(place_id))
    }
}

#[async_trait]
impl<R> PlaceCatalog for PlaceCatalogService<R>
where
    R: PlaceRepository + ?Sized,
{
    async fn find_owner(&self, place_id: PlaceId) -> Result<UserId, Error> {
        Ok(self.load(place_id).await?.owner().clone())
    }

    async fn create_with_owner(
        &self,
        identity: &Identity,
        fields: PlaceFields,
    ) -> Result<Place, Error> {
        let place = Place::new(PlaceId::random(), identity.id().clone(), fields);
        self.places
            .insert(&place)
            .await
            .map_err(map_repository_error)?;
        info!(place_id = %place.id(), owner = %place.owner(), "created place");
        Ok(place)
    }

    async fn update_if_owner(
        &self,
        identity: &Identity,
        place_id: PlaceId,
        fields: PlaceFields,
    ) -> Result<Place, Error> {
        let current = self.load(place_id).await?;
        authorize_owner_action(identity, current.owner())
            .into_result()
            .map_err(|failure| {
                warn!(%place_id, caller = %identity.id(), "rejected update by non-owner");
                map_authorization_failure(failure)
            })?;

        let updated = current.with_fields(fields);
        let written = self
            .places
            .update_owned(&updated)
            .await
            .map_err(map_repository_error)?;
        if !written {
            // Deleted or re-owned between the read and the write.
            return Err(place_not_found(place_id));
        }
        Ok(updated)
    }

    async fn get_place(&self, place_id: PlaceId) -> Result<Place, Error> {
        self.load(place_id).await
    }

    async fn list_places(&self) -> Result<Vec<Place>, Error> {
        self.places.list_all().await.map_err(map_repository_error)
    }

    async fn list_places_for_owner(&self, identity: &Identity) -> Result<Vec<Place>, Error> {
        self.places
            .list_by_owner(identity.id())
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "place_catalog_service_tests.rs"]
mod tests;
