//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::domain::{
    AccountService, BookingLedgerService, Identity, PlaceCatalogService, TokenService,
};
use crate::inbound::http::identity::{CookiePolicy, TOKEN_COOKIE};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::Argon2PasswordHasher;

/// Signing secret shared by handler tests.
pub const TEST_SECRET: &[u8] = b"staybook-test-secret-0123456789abcdef";

/// State wired to a fresh in-memory store, cheap Argon2 parameters and a
/// non-secure cookie policy for plain HTTP test requests.
pub fn test_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::with_params(8, 1, 1).expect("cheap argon2 params"));
    let accounts = Arc::new(AccountService::new(store.clone(), hasher));
    let ports = HttpStatePorts {
        accounts: accounts.clone(),
        profiles: accounts,
        places: Arc::new(PlaceCatalogService::new(store.clone())),
        bookings: Arc::new(BookingLedgerService::new(store.clone(), store)),
    };
    HttpState::new(
        ports,
        TokenService::new(TEST_SECRET, Arc::new(DefaultClock)),
        CookiePolicy {
            secure: false,
            same_site: SameSite::Lax,
        },
    )
}

/// Identity cookie carrying a freshly issued token for `identity`.
pub fn token_cookie(state: &HttpState, identity: &Identity) -> Cookie<'static> {
    let token = state.tokens.issue(identity).expect("issue token");
    Cookie::new(TOKEN_COOKIE, token)
}

/// The `token` cookie set by a response, if any.
pub fn response_token_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .map(Cookie::into_owned)
}
