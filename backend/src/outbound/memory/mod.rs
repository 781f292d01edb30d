//! In-process adapters for running without PostgreSQL.
//!
//! [`MemoryStore`] implements every repository port over a single set of
//! tables behind one async mutex, so cross-table reads (bookings with their
//! places) observe a consistent snapshot. Data lives only as long as the
//! process; the server falls back to it when no database URL is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, NewUserAccount, PlaceRepository,
    PlaceRepositoryError, StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{Booking, BookingWithPlace, Place, PlaceId, User, UserId};

#[derive(Default)]
struct Tables {
    users: Vec<StoredCredentials>,
    places: Vec<Place>,
    place_index: HashMap<PlaceId, usize>,
    bookings: Vec<Booking>,
}

impl Tables {
    fn place(&self, id: PlaceId) -> Option<&Place> {
        self.place_index.get(&id).and_then(|idx| self.places.get(*idx))
    }
}

/// Shared in-memory tables for users, places and bookings.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use staybook::domain::ports::PlaceRepository;
/// use staybook::outbound::memory::MemoryStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = Arc::new(MemoryStore::new());
/// assert!(store.list_all().await.unwrap().is_empty());
/// # });
/// ```
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, account: &NewUserAccount) -> Result<User, UserPersistenceError> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .iter()
            .any(|stored| stored.user.email() == &account.email)
        {
            return Err(UserPersistenceError::duplicate_email(
                account.email.to_string(),
            ));
        }
        let user = account.to_user();
        tables.users.push(StoredCredentials {
            user: user.clone(),
            password_hash: account.password_hash.clone(),
        });
        Ok(user)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|stored| stored.user.email().as_ref() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl PlaceRepository for MemoryStore {
    async fn insert(&self, place: &Place) -> Result<(), PlaceRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.place_index.contains_key(&place.id()) {
            return Err(PlaceRepositoryError::query(format!(
                "place {} already exists",
                place.id()
            )));
        }
        let idx = tables.places.len();
        tables.places.push(place.clone());
        tables.place_index.insert(place.id(), idx);
        Ok(())
    }

    async fn update_owned(&self, place: &Place) -> Result<bool, PlaceRepositoryError> {
        let mut tables = self.tables.lock().await;
        let Some(idx) = tables.place_index.get(&place.id()).copied() else {
            return Ok(false);
        };
        match tables.places.get_mut(idx) {
            Some(stored) if stored.owner() == place.owner() => {
                *stored = place.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_by_id(&self, id: PlaceId) -> Result<Option<Place>, PlaceRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.place(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Place>, PlaceRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.places.clone())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Place>, PlaceRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .places
            .iter()
            .filter(|place| place.owner() == owner)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.place(booking.place()).is_none() {
            return Err(BookingRepositoryError::query(format!(
                "booking references unknown place {}",
                booking.place()
            )));
        }
        tables.bookings.push(booking.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<BookingWithPlace>, BookingRepositoryError> {
        let tables = self.tables.lock().await;
        tables
            .bookings
            .iter()
            .filter(|booking| booking.user() == user)
            .map(|booking| {
                tables
                    .place(booking.place())
                    .cloned()
                    .map(|place| BookingWithPlace::new(booking.clone(), place))
                    .ok_or_else(|| {
                        BookingRepositoryError::query(format!(
                            "booking {} references missing place {}",
                            booking.id(),
                            booking.place()
                        ))
                    })
            })
            .collect()
    }
}
