//! Tests for listing handlers.

use super::*;
use crate::domain::{EmailAddress, Identity, UserId};
use crate::inbound::http::error::json_config;
use crate::inbound::http::test_utils::{test_state, token_cookie};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::Value;

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
        .service(update_place)
        .service(list_places)
        .service(get_place)
        .service(list_user_places)
}

struct Harness {
    state: HttpState,
    host: Cookie<'static>,
    host_id: UserId,
    stranger: Cookie<'static>,
}

#[fixture]
fn harness() -> Harness {
    let state = test_state();
    let host_id = UserId::random();
    let host = token_cookie(
        &state,
        &Identity::new(host_id.clone(), EmailAddress::new("host@example.com").expect("email")),
    );
    let stranger = token_cookie(
        &state,
        &Identity::new(UserId::random(), EmailAddress::new("other@example.com").expect("email")),
    );
    Harness {
        state,
        host,
        host_id,
        stranger,
    }
}

fn listing(title: &str) -> Value {
    json!({
        "title": title,
        "address": "1 High Street",
        "addedPhotos": ["a.jpg", "b.jpg"],
        "description": "Bright and quiet",
        "perks": ["wifi", "parking", "wifi"],
        "extraInfo": "No parties",
        "checkIn": "14:00",
        "checkOut": "11:00",
        "maxGuests": "3",
        "price": 120
    })
}

async fn create<S>(app: &S, cookie: &Cookie<'static>, body: Value) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = actix_test::TestRequest::post()
        .uri("/places")
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    let res = actix_test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    actix_test::read_body_json(res).await
}

fn id_of(place: &Value) -> String {
    place
        .get("id")
        .and_then(Value::as_str)
        .expect("place id")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_sets_owner_from_identity(harness: Harness) {
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let mut body = listing("Loft");
    body["owner"] = json!(UserId::random().to_string());

    let place = create(&app, &harness.host, body).await;
    assert_eq!(
        place.get("owner").and_then(Value::as_str),
        Some(harness.host_id.to_string().as_str())
    );
    assert_eq!(place.get("photos"), Some(&json!(["a.jpg", "b.jpg"])));
    assert_eq!(place.get("perks"), Some(&json!(["wifi", "parking"])));
    assert_eq!(place.get("maxGuests"), Some(&json!(3)));
    assert_eq!(place.get("extraInfo"), Some(&json!("No parties")));
}

#[rstest]
#[actix_web::test]
async fn create_requires_identity(harness: Harness) {
    let app = actix_test::init_service(test_app(harness.state)).await;
    let req = actix_test::TestRequest::post()
        .uri("/places")
        .set_json(listing("Loft"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("title", json!("  "), "missing_field")]
#[case("price", json!(0), "out_of_range")]
#[case("price", json!(3_000_000_000_u64), "out_of_range")]
#[case("maxGuests", json!("many"), "invalid_format")]
#[case("checkIn", json!("2pm"), "invalid_format")]
#[case("perks", json!(["jacuzzi"]), "invalid_value")]
#[actix_web::test]
async fn invalid_fields_are_bad_requests(
    harness: Harness,
    #[case] field: &str,
    #[case] value: Value,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(harness.state)).await;
    let mut body = listing("Loft");
    body[field] = value;
    let req = actix_test::TestRequest::post()
        .uri("/places")
        .cookie(harness.host)
        .set_json(body)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = actix_test::read_body_json(res).await;
    assert_eq!(err.pointer("/details/field"), Some(&json!(field)));
    assert_eq!(err.pointer("/details/code"), Some(&json!(code)));
}

#[rstest]
#[actix_web::test]
async fn owner_can_update(harness: Harness) {
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let created = create(&app, &harness.host, listing("Loft")).await;
    let mut update = listing("Renovated loft");
    update["id"] = json!(id_of(&created));

    let req = actix_test::TestRequest::put()
        .uri("/places")
        .cookie(harness.host.clone())
        .set_json(update)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(res).await;
    assert_eq!(updated.get("title"), Some(&json!("Renovated loft")));
    assert_eq!(updated.get("id"), created.get("id"));
    assert_eq!(updated.get("owner"), created.get("owner"));
}

#[rstest]
#[actix_web::test]
async fn non_owner_update_is_forbidden_and_leaves_place_unchanged(harness: Harness) {
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    let created = create(&app, &harness.host, listing("Loft")).await;
    let id = id_of(&created);
    let mut update = listing("Stolen loft");
    update["id"] = json!(id);

    let req = actix_test::TestRequest::put()
        .uri("/places")
        .cookie(harness.stranger.clone())
        .set_json(update)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let req = actix_test::TestRequest::get()
        .uri(&format!("/places/{id}"))
        .to_request();
    let stored: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored, created);
}

#[rstest]
#[case(None, StatusCode::BAD_REQUEST)]
#[case(Some("not-a-uuid"), StatusCode::BAD_REQUEST)]
#[case(Some("7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn update_with_bad_or_unknown_id(
    harness: Harness,
    #[case] id: Option<&str>,
    #[case] status: StatusCode,
) {
    let app = actix_test::init_service(test_app(harness.state)).await;
    let mut update = listing("Loft");
    if let Some(id) = id {
        update["id"] = json!(id);
    }
    let req = actix_test::TestRequest::put()
        .uri("/places")
        .cookie(harness.host)
        .set_json(update)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), status);
}

#[rstest]
#[case("/places/not-a-uuid", StatusCode::BAD_REQUEST)]
#[case("/places/7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn get_place_rejects_bad_or_unknown_ids(
    harness: Harness,
    #[case] uri: &str,
    #[case] status: StatusCode,
) {
    let app = actix_test::init_service(test_app(harness.state)).await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
        .await;
    assert_eq!(res.status(), status);
}

#[rstest]
#[actix_web::test]
async fn user_places_only_lists_own_listings(harness: Harness) {
    let app = actix_test::init_service(test_app(harness.state.clone())).await;
    create(&app, &harness.host, listing("Mine")).await;
    create(&app, &harness.stranger, listing("Theirs")).await;

    let req = actix_test::TestRequest::get()
        .uri("/user-places")
        .cookie(harness.host.clone())
        .to_request();
    let mine: Vec<Value> = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].get("title"), Some(&json!("Mine")));

    let req = actix_test::TestRequest::get().uri("/places").to_request();
    let all: Vec<Value> = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);
}
