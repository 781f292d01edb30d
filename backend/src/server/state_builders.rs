//! Wires repositories, services and identity settings into [`HttpState`].

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use staybook::domain::ports::{BookingRepository, PlaceRepository, UserRepository};
use staybook::domain::{AccountService, BookingLedgerService, PlaceCatalogService, TokenService};
use staybook::inbound::http::identity::CookiePolicy;
use staybook::inbound::http::state::{HttpState, HttpStatePorts};
use staybook::outbound::memory::MemoryStore;
use staybook::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselPlaceRepository, DieselUserRepository,
};
use staybook::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

struct Repositories {
    users: Arc<dyn UserRepository>,
    places: Arc<dyn PlaceRepository>,
    bookings: Arc<dyn BookingRepository>,
}

fn diesel_repositories(pool: &DbPool) -> Repositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        places: Arc::new(DieselPlaceRepository::new(pool.clone())),
        bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
    }
}

fn memory_repositories() -> Repositories {
    let store = Arc::new(MemoryStore::new());
    Repositories {
        users: store.clone(),
        places: store.clone(),
        bookings: store,
    }
}

/// Build handler state, choosing Diesel or in-memory repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let repos = match &config.db_pool {
        Some(pool) => diesel_repositories(pool),
        None => {
            info!("no database configured; using in-memory storage");
            memory_repositories()
        }
    };

    let accounts = Arc::new(AccountService::new(
        repos.users,
        Arc::new(Argon2PasswordHasher::default()),
    ));
    let ports = HttpStatePorts {
        accounts: accounts.clone(),
        profiles: accounts,
        places: Arc::new(PlaceCatalogService::new(repos.places.clone())),
        bookings: Arc::new(BookingLedgerService::new(repos.bookings, repos.places)),
    };
    let tokens = TokenService::new(config.identity.secret.as_bytes(), Arc::new(DefaultClock));
    let cookies = CookiePolicy {
        secure: config.identity.cookie_secure,
        same_site: config.identity.same_site,
    };
    HttpState::new(ports, tokens, cookies)
}
