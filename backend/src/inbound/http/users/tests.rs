//! Tests for account handlers.

use super::*;
use crate::domain::{EmailAddress, UserId};
use crate::inbound::http::error::json_config;
use crate::inbound::http::identity::TOKEN_COOKIE;
use crate::inbound::http::test_utils::{response_token_cookie, test_state, token_cookie};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
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
        .service(register)
        .service(login)
        .service(profile)
        .service(logout)
}

fn register_body(email: &str) -> Value {
    json!({ "name": "Ada Lovelace", "email": email, "password": "analytical" })
}

fn detail(body: &Value, key: &str) -> Option<String> {
    body.pointer(&format!("/details/{key}"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[actix_web::test]
async fn register_returns_public_user_fields() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(register_body(" Ada@Example.com "))
        .to_request();

    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("email"), Some(&json!("ada@example.com")));
    assert_eq!(body.get("name"), Some(&json!("Ada Lovelace")));
    assert!(body.get("id").and_then(Value::as_str).is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[actix_web::test]
async fn duplicate_registration_is_unprocessable() {
    let app = actix_test::init_service(test_app(test_state())).await;
    for expected in [StatusCode::OK, StatusCode::UNPROCESSABLE_ENTITY] {
        let req = actix_test::TestRequest::post()
            .uri("/register")
            .set_json(register_body("ada@example.com"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), expected);
        if expected == StatusCode::UNPROCESSABLE_ENTITY {
            let body: Value = actix_test::read_body_json(res).await;
            assert_eq!(detail(&body, "field").as_deref(), Some("email"));
            assert_eq!(detail(&body, "code").as_deref(), Some("duplicate"));
        }
    }
}

#[rstest]
#[case(json!({ "name": "", "email": "a@b.co", "password": "secret" }), "name", "missing_field")]
#[case(json!({ "name": "Ada", "email": "nope", "password": "secret" }), "email", "invalid_format")]
#[case(json!({ "name": "Ada", "email": "a@b.co", "password": "short" }), "password", "too_short")]
#[case(json!({ "email": "a@b.co", "password": "secret" }), "name", "missing_field")]
#[actix_web::test]
async fn invalid_registration_is_unprocessable(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(test_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(body)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("code"), Some(&json!("unprocessable_entity")));
    assert_eq!(detail(&body, "field").as_deref(), Some(field));
    assert_eq!(detail(&body, "code").as_deref(), Some(code));
}

#[actix_web::test]
async fn login_sets_http_only_token_cookie() {
    let state = test_state();
    let app = actix_test::init_service(test_app(state.clone())).await;
    let register_req = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("ada@example.com"))
        .to_request();
    actix_test::call_service(&app, register_req).await;

    let req = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "ADA@example.com", "password": "analytical" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = response_token_cookie(&res).expect("token cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.max_age().is_none());

    let identity = state.tokens.verify(Some(cookie.value())).expect("valid token");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("id").and_then(Value::as_str), Some(identity.id().as_ref()));
}

#[rstest]
#[case("ghost@example.com", "analytical", StatusCode::NOT_FOUND)]
#[case("ada@example.com", "wrong-password", StatusCode::UNPROCESSABLE_ENTITY)]
#[case("", "analytical", StatusCode::UNPROCESSABLE_ENTITY)]
#[case("ada@example.com", "", StatusCode::UNPROCESSABLE_ENTITY)]
#[actix_web::test]
async fn failed_logins_set_no_cookie(
    #[case] email: &str,
    #[case] password: &str,
    #[case] status: StatusCode,
) {
    let app = actix_test::init_service(test_app(test_state())).await;
    let register_req = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("ada@example.com"))
        .to_request();
    actix_test::call_service(&app, register_req).await;

    let req = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), status);
    assert!(response_token_cookie(&res).is_none());
}

#[actix_web::test]
async fn profile_is_null_without_cookie() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let req = actix_test::TestRequest::get().uri("/profile").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = actix_test::read_body(res).await;
    assert_eq!(body, "null");
}

#[actix_web::test]
async fn profile_returns_logged_in_user() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let register_req = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(register_body("ada@example.com"))
        .to_request();
    actix_test::call_service(&app, register_req).await;
    let login_req = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "ada@example.com", "password": "analytical" }))
        .to_request();
    let login_res = actix_test::call_service(&app, login_req).await;
    let cookie = response_token_cookie(&login_res).expect("cookie");

    let req = actix_test::TestRequest::get()
        .uri("/profile")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.get("email"), Some(&json!("ada@example.com")));
    assert_eq!(body.get("name"), Some(&json!("Ada Lovelace")));
}

#[actix_web::test]
async fn profile_rejects_forged_token() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/profile")
        .cookie(Cookie::new(TOKEN_COOKIE, "forged.token.value"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_rejects_token_for_unknown_account() {
    let state = test_state();
    let ghost = Identity::new(
        UserId::random(),
        EmailAddress::new("ghost@example.com").expect("email"),
    );
    let cookie = token_cookie(&state, &ghost);
    let app = actix_test::init_service(test_app(state)).await;

    let req = actix_test::TestRequest::get()
        .uri("/profile")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn logout_clears_cookie_and_returns_true() {
    let app = actix_test::init_service(test_app(test_state())).await;
    let req = actix_test::TestRequest::post().uri("/logout").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = response_token_cookie(&res).expect("removal cookie");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    let body = actix_test::read_body(res).await;
    assert_eq!(body, "true");
}
