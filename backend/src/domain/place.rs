//! Rentable place listings.
//!
//! A [`Place`] is owned by the user who created it. Listing fields arrive as
//! a loose [`PlaceDraft`] from handlers and are validated into
//! [`PlaceFields`] before any repository sees them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{NumericInput, NumericInputError, UserId};

/// Stable place identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(Uuid);

impl PlaceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PlaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Amenity advertised on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Perk {
    Wifi,
    Parking,
    Tv,
    Radio,
    Pets,
    Entrance,
}

impl Perk {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::Parking => "parking",
            Self::Tv => "tv",
            Self::Radio => "radio",
            Self::Pets => "pets",
            Self::Entrance => "entrance",
        }
    }
}

impl FromStr for Perk {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "wifi" => Ok(Self::Wifi),
            "parking" => Ok(Self::Parking),
            "tv" => Ok(Self::Tv),
            "radio" => Ok(Self::Radio),
            "pets" => Ok(Self::Pets),
            "entrance" => Ok(Self::Entrance),
            _ => Err(()),
        }
    }
}

/// Check-in or check-out time of day, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StayTime(NaiveTime);

impl StayTime {
    pub fn parse(raw: &str) -> Option<Self> {
        NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok().map(Self)
    }
}

impl fmt::Display for StayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl From<StayTime> for String {
    fn from(value: StayTime) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for StayTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("`{value}` is not an HH:MM time"))
    }
}

/// Validation failures for listing fields, each tied to a request field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceValidationError {
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    #[error("{field} has an unrecognised value `{value}`")]
    InvalidValue { field: &'static str, value: String },
    #[error("{field} is not in the expected format")]
    InvalidFormat { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl PlaceValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidValue { field, .. }
            | Self::InvalidFormat { field }
            | Self::OutOfRange { field, .. } => field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidValue { .. } => "invalid_value",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

/// Unvalidated listing fields as submitted by a host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDraft {
    pub title: Option<String>,
    pub address: Option<String>,
    pub photos: Vec<String>,
    pub description: Option<String>,
    pub perks: Vec<String>,
    pub extra_info: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub max_guests: Option<NumericInput>,
    pub price: Option<NumericInput>,
}

/// Highest accepted nightly price; listings store it in a signed 32-bit column.
pub const PRICE_MAX: u32 = i32::MAX.unsigned_abs();

/// Validated listing content shared by create and update.
///
/// ## Invariants
/// - `title` and `address` are trimmed and non-empty.
/// - `perks` holds no duplicates and keeps submission order.
/// - `max_guests >= 1` and `1 <= price <= PRICE_MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceFields {
    title: String,
    address: String,
    photos: Vec<String>,
    description: String,
    perks: Vec<Perk>,
    extra_info: String,
    #[schema(value_type = Option<String>, example = "14:00")]
    check_in: Option<StayTime>,
    #[schema(value_type = Option<String>, example = "11:00")]
    check_out: Option<StayTime>,
    max_guests: u16,
    price: u32,
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, PlaceValidationError> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(PlaceValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

fn optional_time(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<StayTime>, PlaceValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => StayTime::parse(raw)
            .map(Some)
            .ok_or(PlaceValidationError::InvalidFormat { field }),
    }
}

fn positive<T: TryFrom<i64>>(
    value: Option<NumericInput>,
    field: &'static str,
    max: i64,
) -> Result<T, PlaceValidationError> {
    let raw = value.ok_or(PlaceValidationError::MissingField { field })?;
    let number = raw.to_i64().map_err(|err| match err {
        NumericInputError::Blank => PlaceValidationError::MissingField { field },
        NumericInputError::NotAnInteger => PlaceValidationError::InvalidFormat { field },
    })?;
    let out_of_range = PlaceValidationError::OutOfRange { field, min: 1, max };
    if !(1..=max).contains(&number) {
        return Err(out_of_range);
    }
    T::try_from(number).map_err(|_| out_of_range)
}

impl PlaceFields {
    /// Validate a draft field by field, reporting the first failure.
    pub fn try_from_draft(draft: PlaceDraft) -> Result<Self, PlaceValidationError> {
        let title = required_text(draft.title, "title")?;
        let address = required_text(draft.address, "address")?;

        let mut perks = Vec::with_capacity(draft.perks.len());
        for raw in draft.perks {
            let perk = raw
                .parse::<Perk>()
                .map_err(|()| PlaceValidationError::InvalidValue {
                    field: "perks",
                    value: raw.clone(),
                })?;
            if !perks.contains(&perk) {
                perks.push(perk);
            }
        }

        let check_in = optional_time(draft.check_in, "checkIn")?;
        let check_out = optional_time(draft.check_out, "checkOut")?;
        let max_guests = positive::<u16>(draft.max_guests, "maxGuests", i64::from(u16::MAX))?;
        let price = positive::<u32>(draft.price, "price", i64::from(PRICE_MAX))?;

        Ok(Self {
            title,
            address,
            photos: draft
                .photos
                .into_iter()
                .filter(|photo| !photo.trim().is_empty())
                .collect(),
            description: draft.description.unwrap_or_default(),
            perks,
            extra_info: draft.extra_info.unwrap_or_default(),
            check_in,
            check_out,
            max_guests,
            price,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn perks(&self) -> &[Perk] {
        &self.perks
    }

    pub fn extra_info(&self) -> &str {
        &self.extra_info
    }

    pub fn check_in(&self) -> Option<StayTime> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<StayTime> {
        self.check_out
    }

    pub fn max_guests(&self) -> u16 {
        self.max_guests
    }

    /// Nightly rate in whole currency units.
    pub fn price(&self) -> u32 {
        self.price
    }
}

/// Stored listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[schema(value_type = String, example = "7a1d6f0e-2b8c-4c1e-9a0f-5f4d3c2b1a09")]
    id: PlaceId,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    owner: UserId,
    #[serde(flatten)]
    fields: PlaceFields,
}

impl Place {
    pub fn new(id: PlaceId, owner: UserId, fields: PlaceFields) -> Self {
        Self { id, owner, fields }
    }

    pub fn id(&self) -> PlaceId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn fields(&self) -> &PlaceFields {
        &self.fields
    }

    /// Replace the listing content; id and owner never change.
    pub fn with_fields(self, fields: PlaceFields) -> Self {
        Self { fields, ..self }
    }
}
