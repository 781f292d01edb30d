//! Account handlers: registration, login, profile and logout.
//!
//! ```text
//! POST /register {"name":"Ada","email":"ada@example.com","password":"secret"}
//! POST /login    {"email":"ada@example.com","password":"secret"}
//! GET  /profile
//! POST /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{
    Error, Identity, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::OptionalIdentity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::with_field;

/// Registration body for `POST /register`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse")]
    pub password: String,
}

impl TryFrom<&RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: &RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

/// Login body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "correct horse")]
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    with_field(Error::unprocessable(err.to_string()), err.field(), err.code())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    with_field(
        Error::unprocessable(err.to_string()),
        err.field(),
        "missing_field",
    )
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = User),
        (status = 422, description = "Invalid input or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<User>> {
    let registration = Registration::try_from(&*payload).map_err(map_registration_error)?;
    let user = state.accounts.register(&registration).await?;
    Ok(web::Json(user))
}

/// Check credentials and set the `token` identity cookie.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Identity token cookie"))),
        (status = 404, description = "No account for this email", body = Error),
        (status = 422, description = "Wrong password or blank field", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(&*payload).map_err(map_login_validation_error)?;
    let user = state.accounts.login(&credentials).await?;
    let token = state
        .tokens
        .issue(&Identity::from(&user))
        .map_err(|err| Error::internal(err.to_string()))?;
    info!(user_id = %user.id(), "user logged in");
    Ok(HttpResponse::Ok()
        .cookie(state.cookies.issue(token))
        .json(user))
}

/// Profile of the caller, or `null` without an identity cookie.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Caller's profile or null", body = Option<User>),
        (status = 401, description = "Token invalid or account gone", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "profile",
    security([], ("IdentityCookie" = []))
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    identity: OptionalIdentity,
) -> ApiResult<web::Json<Option<User>>> {
    let Some(identity) = identity.into_inner() else {
        return Ok(web::Json(None));
    };
    match state.profiles.fetch_profile(identity.id()).await? {
        Some(user) => Ok(web::Json(Some(user))),
        None => {
            warn!(user_id = %identity.id(), "valid token for unknown account");
            Err(with_field(
                Error::unauthorized("account no longer exists"),
                "token",
                "unknown_account",
            ))
        }
    }
}

/// Clear the identity cookie.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Cookie cleared", body = bool)),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.cookies.clear())
        .json(true)
}

#[cfg(test)]
mod tests;
