//! Tests for booking handlers.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockBookingLedger;
use crate::domain::{EmailAddress, Identity, UserId};
use crate::inbound::http::error::json_config;
use crate::inbound::http::places::create_place;
use crate::inbound::http::test_utils::{test_state, token_cookie};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(create_place)
        .service(create_booking)
        .service(list_bookings)
}

fn identity(email: &str) -> Identity {
    Identity::new(UserId::random(), EmailAddress::new(email).expect("email"))
}

struct Guests {
    state: HttpState,
    alice: Identity,
    alice_cookie: Cookie<'static>,
    bob_cookie: Cookie<'static>,
}

#[fixture]
fn guests() -> Guests {
    let state = test_state();
    let alice = identity("alice@example.com");
    let alice_cookie = token_cookie(&state, &alice);
    let bob_cookie = token_cookie(&state, &identity("bob@example.com"));
    Guests {
        state,
        alice,
        alice_cookie,
        bob_cookie,
    }
}

async fn call<S>(app: &S, req: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn listed_place<S>(app: &S, host: &Cookie<'static>, price: u32) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, place) = call(
        app,
        actix_test::TestRequest::post()
            .uri("/places")
            .cookie(host.clone())
            .set_json(json!({
                "title": "Loft",
                "address": "2 High Street",
                "maxGuests": 4,
                "price": price
            })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    place
        .get("id")
        .and_then(Value::as_str)
        .expect("place id")
        .to_owned()
}

fn booking_body(place: &str) -> Value {
    json!({
        "place": place,
        "checkIn": "2024-05-01",
        "checkOut": "2024-05-04",
        "numberOfGuests": "2",
        "name": "Alice",
        "phone": "1234567890",
        "price": 1
    })
}

#[rstest]
#[actix_web::test]
async fn price_is_computed_from_the_listing(guests: Guests) {
    let app = actix_test::init_service(test_app(guests.state.clone())).await;
    let place = listed_place(&app, &guests.bob_cookie, 2000).await;
    let mut body = booking_body(&place);
    body["user"] = json!(UserId::random().to_string());

    let (status, booking) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/bookings")
            .cookie(guests.alice_cookie.clone())
            .set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking.get("price"), Some(&json!(6000)));
    assert_eq!(booking.get("numberOfGuests"), Some(&json!(2)));
    assert_eq!(booking.get("place"), Some(&json!(place)));
    assert_eq!(
        booking.get("user"),
        Some(&json!(guests.alice.id().to_string()))
    );
}

#[rstest]
#[case("checkIn", json!("2024-05-10"), "checkOut", "invalid_range")]
#[case("phone", json!("12345"), "phone", "invalid_format")]
#[case("numberOfGuests", json!(0), "numberOfGuests", "invalid_range")]
#[case("name", json!("   "), "name", "missing_field")]
#[case("checkOut", json!("next tuesday"), "checkOut", "invalid_format")]
#[actix_web::test]
async fn invalid_requests_are_rejected_before_writing(
    guests: Guests,
    #[case] key: &str,
    #[case] value: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(guests.state.clone())).await;
    let place = listed_place(&app, &guests.bob_cookie, 100).await;
    let mut body = booking_body(&place);
    body[key] = value;
    if key == "checkIn" {
        body["checkOut"] = json!("2024-05-10");
    }

    let (status, err) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/bookings")
            .cookie(guests.alice_cookie.clone())
            .set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.pointer("/details/field"), Some(&json!(field)));
    assert_eq!(err.pointer("/details/code"), Some(&json!(code)));

    let (_, listed) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/bookings")
            .cookie(guests.alice_cookie.clone()),
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn unknown_place_is_not_found(guests: Guests) {
    let app = actix_test::init_service(test_app(guests.state.clone())).await;
    let (status, _) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/bookings")
            .cookie(guests.alice_cookie.clone())
            .set_json(booking_body("7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn bookings_require_identity(guests: Guests) {
    let app = actix_test::init_service(test_app(guests.state)).await;
    let (status, _) = call(&app, actix_test::TestRequest::get().uri("/bookings")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(
        &app,
        actix_test::TestRequest::post()
            .uri("/bookings")
            .set_json(booking_body("7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn listings_are_scoped_to_the_caller_and_embed_places(guests: Guests) {
    let app = actix_test::init_service(test_app(guests.state.clone())).await;
    let place = listed_place(&app, &guests.bob_cookie, 50).await;
    for cookie in [&guests.alice_cookie, &guests.bob_cookie] {
        let (status, _) = call(
            &app,
            actix_test::TestRequest::post()
                .uri("/bookings")
                .cookie(cookie.clone())
                .set_json(booking_body(&place)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/bookings")
            .cookie(guests.alice_cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = listed.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].get("user"),
        Some(&json!(guests.alice.id().to_string()))
    );
    assert_eq!(entries[0].pointer("/place/id"), Some(&json!(place)));
    assert_eq!(entries[0].pointer("/place/title"), Some(&json!("Loft")));
}

#[rstest]
#[actix_web::test]
async fn ledger_receives_the_cookie_identity(guests: Guests) {
    let expected = guests.alice.id().clone();
    let mut ledger = MockBookingLedger::new();
    ledger
        .expect_list_bookings_for_user()
        .withf(move |identity| identity.id() == &expected)
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let mut state = guests.state.clone();
    state.bookings = Arc::new(ledger);
    let app = actix_test::init_service(test_app(state)).await;

    let (status, listed) = call(
        &app,
        actix_test::TestRequest::get()
            .uri("/bookings")
            .cookie(guests.alice_cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}
