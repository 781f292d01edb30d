//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, the token service and the cookie policy, so they stay testable
//! without I/O.

use std::sync::Arc;

use crate::domain::TokenService;
use crate::domain::ports::{AccountCommand, BookingLedger, PlaceCatalog, UserProfileQuery};
use crate::inbound::http::identity::CookiePolicy;

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn UserProfileQuery>,
    pub places: Arc<dyn PlaceCatalog>,
    pub bookings: Arc<dyn BookingLedger>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn UserProfileQuery>,
    pub places: Arc<dyn PlaceCatalog>,
    pub bookings: Arc<dyn BookingLedger>,
    pub tokens: TokenService,
    pub cookies: CookiePolicy,
}

impl HttpState {
    /// Assemble state from ports, the token service and the cookie policy.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use staybook::domain::{AccountService, BookingLedgerService, PlaceCatalogService, TokenService};
    /// use staybook::inbound::http::identity::CookiePolicy;
    /// use staybook::inbound::http::state::{HttpState, HttpStatePorts};
    /// use staybook::outbound::memory::MemoryStore;
    /// use staybook::outbound::security::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let accounts = Arc::new(AccountService::new(
    ///     store.clone(),
    ///     Arc::new(Argon2PasswordHasher::default()),
    /// ));
    /// let ports = HttpStatePorts {
    ///     accounts: accounts.clone(),
    ///     profiles: accounts,
    ///     places: Arc::new(PlaceCatalogService::new(store.clone())),
    ///     bookings: Arc::new(BookingLedgerService::new(store.clone(), store)),
    /// };
    /// let tokens = TokenService::new(&[7_u8; 32], Arc::new(DefaultClock));
    /// let state = HttpState::new(ports, tokens, CookiePolicy::default());
    /// let _places = state.places.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, tokens: TokenService, cookies: CookiePolicy) -> Self {
        let HttpStatePorts {
            accounts,
            profiles,
            places,
            bookings,
        } = ports;
        Self {
            accounts,
            profiles,
            places,
            bookings,
            tokens,
            cookies,
        }
    }
}
