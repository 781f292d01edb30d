//! Identity cookie handling.
//!
//! Handlers never parse cookies themselves: they take [`AuthenticatedIdentity`]
//! when a caller must be signed in, or [`OptionalIdentity`] when anonymous
//! access is fine but a forged token must still be rejected.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{AuthFailure, Error, Identity};
use crate::inbound::http::state::HttpState;

/// Name of the cookie carrying the signed identity token.
pub const TOKEN_COOKIE: &str = "token";

/// Attributes applied to the identity cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

impl CookiePolicy {
    /// Session cookie holding `token`: `HttpOnly`, `Path=/`, no max-age.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish()
    }

    /// Empty, already expired cookie that makes browsers drop the token.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = self.issue(String::new());
        cookie.make_removal();
        cookie
    }
}

fn auth_error(failure: AuthFailure) -> Error {
    let code = match failure {
        AuthFailure::Missing => "missing_token",
        AuthFailure::Invalid => "invalid_token",
    };
    Error::unauthorized(failure.to_string()).with_details(json!({ "code": code }))
}

/// Verify the request's token cookie against the configured token service.
fn verify_cookie(req: &HttpRequest) -> Result<Result<Identity, AuthFailure>, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state not configured"))?;
    let cookie = req.cookie(TOKEN_COOKIE);
    Ok(state.tokens.verify(cookie.as_ref().map(Cookie::value)))
}

fn reject(req: &HttpRequest, failure: AuthFailure) -> Error {
    debug!(%failure, path = %req.path(), "rejected identity token");
    auth_error(failure)
}

/// Identity of a signed-in caller; extraction fails with `401` otherwise.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(Identity);

impl AuthenticatedIdentity {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl std::ops::Deref for AuthenticatedIdentity {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify_cookie(req).and_then(|verified| {
            verified
                .map(Self)
                .map_err(|failure| reject(req, failure))
        }))
    }
}

/// Identity of the caller if a token was sent. An absent or empty cookie
/// yields `None`; a token that fails verification is still a `401`.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(Option<Identity>);

impl OptionalIdentity {
    pub fn into_inner(self) -> Option<Identity> {
        self.0
    }
}

impl FromRequest for OptionalIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify_cookie(req).and_then(|verified| match verified {
            Ok(identity) => Ok(Self(Some(identity))),
            Err(AuthFailure::Missing) => Ok(Self(None)),
            Err(failure) => Err(reject(req, failure)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::{EmailAddress, UserId};
    use crate::inbound::http::test_utils::test_state;

    fn identity() -> Identity {
        Identity::new(
            UserId::random(),
            EmailAddress::new("host@example.com").expect("email"),
        )
    }

    async fn whoami(who: AuthenticatedIdentity) -> HttpResponse {
        HttpResponse::Ok().body(who.id().to_string())
    }

    async fn maybe(who: OptionalIdentity) -> HttpResponse {
        match who.into_inner() {
            Some(identity) => HttpResponse::Ok().body(identity.email().to_string()),
            None => HttpResponse::NoContent().finish(),
        }
    }

    macro_rules! app {
        ($state:expr) => {
            actix_web::test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .route("/whoami", web::get().to(whoami))
                    .route("/maybe", web::get().to(maybe)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn valid_cookie_yields_identity() {
        let state = test_state();
        let who = identity();
        let token = state.tokens.issue(&who).expect("token");
        let app = app!(state);

        let req = actix_web::test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(TOKEN_COOKIE, token))
            .to_request();
        let body = actix_web::test::call_and_read_body(&app, req).await;
        assert_eq!(body, who.id().to_string());
    }

    #[rstest]
    #[case(None, "missing_token")]
    #[case(Some(""), "missing_token")]
    #[case(Some("garbage"), "invalid_token")]
    #[actix_web::test]
    async fn required_identity_rejects(#[case] token: Option<&str>, #[case] code: &str) {
        let app = app!(test_state());
        let mut req = actix_web::test::TestRequest::get().uri("/whoami");
        if let Some(token) = token {
            req = req.cookie(Cookie::new(TOKEN_COOKIE, token.to_owned()));
        }
        let res = actix_web::test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_web::test::read_body_json(res).await;
        assert_eq!(body.pointer("/details/code").and_then(Value::as_str), Some(code));
    }

    #[actix_web::test]
    async fn token_signed_elsewhere_is_rejected() {
        let foreign = crate::domain::TokenService::new(
            b"some-other-secret-with-enough-bytes!",
            std::sync::Arc::new(mockable::DefaultClock),
        );
        let token = foreign.issue(&identity()).expect("token");
        let app = app!(test_state());

        let req = actix_web::test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(TOKEN_COOKIE, token))
            .to_request();
        let res = actix_web::test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn optional_identity_is_none_without_cookie() {
        let app = app!(test_state());
        let res =
            actix_web::test::call_service(&app, actix_web::test::TestRequest::get().uri("/maybe").to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn optional_identity_still_rejects_forged_tokens() {
        let app = app!(test_state());
        let req = actix_web::test::TestRequest::get()
            .uri("/maybe")
            .cookie(Cookie::new(TOKEN_COOKIE, "eyJhbGciOiJIUzI1NiJ9.e30.bad"))
            .to_request();
        let res = actix_web::test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    fn issued_cookie_attributes() {
        let policy = CookiePolicy {
            secure: false,
            same_site: SameSite::Strict,
        };
        let cookie = policy.issue("abc".to_owned());
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert!(cookie.max_age().is_none());
    }

    #[rstest]
    fn cleared_cookie_is_empty_and_expired() {
        let cookie = CookiePolicy::default().clear();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    }
}
