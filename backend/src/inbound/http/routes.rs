//! Route table for the JSON API.
//!
//! ```text
//! POST /register       POST /login        GET /profile      POST /logout
//! POST /places         PUT  /places       GET /places/{id}  GET  /places
//! GET  /user-places    POST /bookings     GET /bookings
//! GET  /health/ready   GET  /health/live
//! ```
//!
//! Callers still provide `web::Data<HttpState>` and `web::Data<HealthState>`.

use actix_web::web;

use super::bookings::{create_booking, list_bookings};
use super::error::json_config;
use super::health::{live, ready};
use super::places::{create_place, get_place, list_places, list_user_places, update_place};
use super::users::{login, logout, profile, register};

/// Register every handler plus the JSON extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use staybook::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(register)
        .service(login)
        .service(profile)
        .service(logout)
        .service(create_place)
        .service(update_place)
        .service(get_place)
        .service(list_places)
        .service(list_user_places)
        .service(create_booking)
        .service(list_bookings)
        .service(ready)
        .service(live);
}
