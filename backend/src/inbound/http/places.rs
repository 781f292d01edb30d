//! Listing handlers.
//!
//! ```text
//! POST /places        {"title":"Loft","address":"1 High St","addedPhotos":[],...}
//! PUT  /places        {"id":"<uuid>","title":"Loft",...}
//! GET  /places/{id}
//! GET  /places
//! GET  /user-places
//! ```
//!
//! Mutating routes require the identity cookie; updates additionally require
//! the caller to own the listing.

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, NumericInput, Place, PlaceDraft, PlaceFields, PlaceId, PlaceValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::AuthenticatedIdentity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_uuid, with_field};

const PLACE_ID: FieldName = FieldName::new("id");

/// Listing fields accepted by `POST /places` and `PUT /places`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceBody {
    /// Listing to update. Ignored on create.
    #[schema(example = "7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09")]
    pub id: Option<String>,
    #[schema(example = "Sunny loft")]
    pub title: Option<String>,
    #[schema(example = "1 High Street")]
    pub address: Option<String>,
    /// Photo references; stored as given.
    #[serde(alias = "photos")]
    pub added_photos: Vec<String>,
    pub description: Option<String>,
    #[schema(example = json!(["wifi", "parking"]))]
    pub perks: Vec<String>,
    pub extra_info: Option<String>,
    #[schema(example = "14:00")]
    pub check_in: Option<String>,
    #[schema(example = "11:00")]
    pub check_out: Option<String>,
    #[schema(value_type = Option<i64>, example = 2)]
    pub max_guests: Option<NumericInput>,
    /// Nightly rate in whole currency units.
    #[schema(value_type = Option<i64>, example = 120)]
    pub price: Option<NumericInput>,
}

impl PlaceBody {
    fn into_fields(self) -> Result<PlaceFields, Error> {
        PlaceFields::try_from_draft(PlaceDraft {
            title: self.title,
            address: self.address,
            photos: self.added_photos,
            description: self.description,
            perks: self.perks,
            extra_info: self.extra_info,
            check_in: self.check_in,
            check_out: self.check_out,
            max_guests: self.max_guests,
            price: self.price,
        })
        .map_err(map_place_validation_error)
    }
}

fn map_place_validation_error(err: PlaceValidationError) -> Error {
    let base = Error::invalid_request(err.to_string());
    match &err {
        PlaceValidationError::InvalidValue { field, value } => base.with_details(json!({
            "field": field,
            "value": value,
            "code": err.code(),
        })),
        _ => with_field(base, err.field(), err.code()),
    }
}

fn parse_place_id(raw: &str) -> Result<PlaceId, Error> {
    parse_uuid(raw, PLACE_ID).map(PlaceId::from_uuid)
}

/// Create a listing owned by the caller.
#[utoipa::path(
    post,
    path = "/places",
    request_body = PlaceBody,
    responses(
        (status = 200, description = "Listing created", body = Place),
        (status = 400, description = "Invalid listing fields", body = Error),
        (status = 401, description = "Identity cookie missing or invalid", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["places"],
    operation_id = "createPlace",
    security(("IdentityCookie" = []))
)]
#[post("/places")]
pub async fn create_place(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<PlaceBody>,
) -> ApiResult<web::Json<Place>> {
    let fields = payload.into_inner().into_fields()?;
    let place = state.places.create_with_owner(&identity, fields).await?;
    Ok(web::Json(place))
}

/// Replace the fields of a listing the caller owns.
#[utoipa::path(
    put,
    path = "/places",
    request_body = PlaceBody,
    responses(
        (status = 200, description = "Listing updated", body = Place),
        (status = 400, description = "Invalid listing fields or id", body = Error),
        (status = 401, description = "Identity cookie missing or invalid", body = Error),
        (status = 403, description = "Caller does not own the listing", body = Error),
        (status = 404, description = "Listing not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["places"],
    operation_id = "updatePlace",
    security(("IdentityCookie" = []))
)]
#[put("/places")]
pub async fn update_place(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    payload: web::Json<PlaceBody>,
) -> ApiResult<web::Json<Place>> {
    let mut body = payload.into_inner();
    let raw_id = body
        .id
        .take()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| missing_field_error(PLACE_ID))?;
    let place_id = parse_place_id(&raw_id)?;
    let fields = body.into_fields()?;
    let place = state
        .places
        .update_if_owner(&identity, place_id, fields)
        .await?;
    Ok(web::Json(place))
}

/// Fetch one listing.
#[utoipa::path(
    get,
    path = "/places/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing", body = Place),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Listing not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["places"],
    operation_id = "getPlace",
    security([])
)]
#[get("/places/{id}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Place>> {
    let place_id = parse_place_id(&path)?;
    Ok(web::Json(state.places.get_place(place_id).await?))
}

/// Every listing.
#[utoipa::path(
    get,
    path = "/places",
    responses(
        (status = 200, description = "All listings", body = [Place]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["places"],
    operation_id = "listPlaces",
    security([])
)]
#[get("/places")]
pub async fn list_places(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Place>>> {
    Ok(web::Json(state.places.list_places().await?))
}

/// Listings owned by the caller.
#[utoipa::path(
    get,
    path = "/user-places",
    responses(
        (status = 200, description = "Caller's listings", body = [Place]),
        (status = 401, description = "Identity cookie missing or invalid", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["places"],
    operation_id = "listUserPlaces",
    security(("IdentityCookie" = []))
)]
#[get("/user-places")]
pub async fn list_user_places(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
) -> ApiResult<web::Json<Vec<Place>>> {
    Ok(web::Json(state.places.list_places_for_owner(&identity).await?))
}

#[cfg(test)]
#[path = "places_tests.rs"]
mod tests;
