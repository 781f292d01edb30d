//! PostgreSQL-backed `PlaceRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};
use crate::domain::{Place, PlaceId, UserId};

use super::diesel_basic_error_mapping::map_basic_diesel_error;
use super::models::{NewPlaceRow, PlaceRow, PlaceValues};
use super::pool::{DbPool, PoolError};
use super::schema::places;

/// Diesel implementation of listing storage.
#[derive(Clone)]
pub struct DieselPlaceRepository {
    pool: DbPool,
}

impl DieselPlaceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlaceRepositoryError {
    PlaceRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> PlaceRepositoryError {
    map_basic_diesel_error(
        &error,
        PlaceRepositoryError::query,
        PlaceRepositoryError::connection,
    )
}

fn rows_to_places(rows: Vec<PlaceRow>) -> Result<Vec<Place>, PlaceRepositoryError> {
    rows.into_iter()
        .map(|row| row.into_place().map_err(PlaceRepositoryError::query))
        .collect()
}

#[async_trait]
impl PlaceRepository for DieselPlaceRepository {
    async fn insert(&self, place: &Place) -> Result<(), PlaceRepositoryError> {
        let values = PlaceValues::from_fields(place.fields()).map_err(PlaceRepositoryError::query)?;
        let row = NewPlaceRow {
            id: *place.id().as_uuid(),
            owner_id: *place.owner().as_uuid(),
            values,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(places::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_owned(&self, place: &Place) -> Result<bool, PlaceRepositoryError> {
        let values = PlaceValues::from_fields(place.fields()).map_err(PlaceRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            places::table
                .filter(places::id.eq(place.id().as_uuid()))
                .filter(places::owner_id.eq(place.owner().as_uuid())),
        )
        .set(&values)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated == 1)
    }

    async fn find_by_id(&self, id: PlaceId) -> Result<Option<Place>, PlaceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlaceRow> = places::table
            .filter(places::id.eq(id.as_uuid()))
            .select(PlaceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_place().map_err(PlaceRepositoryError::query))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Place>, PlaceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlaceRow> = places::table
            .order(places::created_at.asc())
            .select(PlaceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_places(rows)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Place>, PlaceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlaceRow> = places::table
            .filter(places::owner_id.eq(owner.as_uuid()))
            .order(places::created_at.asc())
            .select(PlaceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_places(rows)
    }
}
