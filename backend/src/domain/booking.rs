//! Reservations against places.
//!
//! A [`BookingRequest`] carries the client's raw values. It is validated in a
//! fixed order into a [`ValidatedBooking`], and only the ledger service turns
//! that into a stored [`Booking`] once the place and its nightly price are
//! known. The client-declared price never reaches storage.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::{NumericInput, NumericInputError, Place, PlaceId, UserId};

/// Stable booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
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

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Booking validation failures. Every variant names the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("{field} is out of range")]
    InvalidRange { field: &'static str },
    #[error("{field} is not in the expected format")]
    InvalidFormat { field: &'static str },
}

impl BookingValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidRange { field }
            | Self::InvalidFormat { field } => field,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidRange { .. } => "invalid_range",
            Self::InvalidFormat { .. } => "invalid_format",
        }
    }
}

/// Raw reservation request as submitted by a guest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingRequest {
    pub place: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub number_of_guests: Option<NumericInput>,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Client-side price estimate. Informational only.
    pub price: Option<NumericInput>,
}

const PHONE_DIGITS: usize = 10;

fn parse_date(raw: Option<&str>, field: &'static str) -> Result<NaiveDate, BookingValidationError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(BookingValidationError::MissingField { field })?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive()))
        .map_err(|_| BookingValidationError::InvalidFormat { field })
}

fn parse_guests(raw: Option<&NumericInput>) -> Result<u16, BookingValidationError> {
    const FIELD: &str = "numberOfGuests";
    let raw = raw.ok_or(BookingValidationError::MissingField { field: FIELD })?;
    let count = raw.to_i64().map_err(|err| match err {
        NumericInputError::Blank => BookingValidationError::MissingField { field: FIELD },
        NumericInputError::NotAnInteger => BookingValidationError::InvalidFormat { field: FIELD },
    })?;
    if count < 1 {
        return Err(BookingValidationError::InvalidRange { field: FIELD });
    }
    u16::try_from(count).map_err(|_| BookingValidationError::InvalidRange { field: FIELD })
}

fn parse_phone(raw: Option<&str>) -> Result<String, BookingValidationError> {
    const FIELD: &str = "phone";
    let raw = raw
        .filter(|value| !value.trim().is_empty())
        .ok_or(BookingValidationError::MissingField { field: FIELD })?;
    if raw.len() == PHONE_DIGITS && raw.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(raw.to_owned())
    } else {
        Err(BookingValidationError::InvalidFormat { field: FIELD })
    }
}

/// A request that passed validation but has not been priced yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    place: PlaceId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: u32,
    number_of_guests: u16,
    name: String,
    phone: String,
    declared_price: Option<i64>,
}

impl ValidatedBooking {
    /// Validate a request; the first failing check wins.
    ///
    /// Order: dates, date range, guest count, contact name, contact phone,
    /// place id.
    ///
    /// # Examples
    /// ```
    /// use staybook::domain::{BookingRequest, BookingValidationError, ValidatedBooking};
    ///
    /// let request = BookingRequest {
    ///     check_in: Some("2024-05-10".into()),
    ///     check_out: Some("2024-05-10".into()),
    ///     ..BookingRequest::default()
    /// };
    /// assert_eq!(
    ///     ValidatedBooking::try_from_request(&request),
    ///     Err(BookingValidationError::InvalidRange { field: "checkOut" })
    /// );
    /// ```
    pub fn try_from_request(request: &BookingRequest) -> Result<Self, BookingValidationError> {
        let check_in = parse_date(request.check_in.as_deref(), "checkIn")?;
        let check_out = parse_date(request.check_out.as_deref(), "checkOut")?;
        if check_out <= check_in {
            return Err(BookingValidationError::InvalidRange { field: "checkOut" });
        }
        let nights = u32::try_from((check_out - check_in).num_days())
            .map_err(|_| BookingValidationError::InvalidRange { field: "checkOut" })?;

        let number_of_guests = parse_guests(request.number_of_guests.as_ref())?;

        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(BookingValidationError::MissingField { field: "name" })?
            .to_owned();

        let phone = parse_phone(request.phone.as_deref())?;

        let place = request
            .place
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(BookingValidationError::MissingField { field: "place" })?
            .parse::<PlaceId>()
            .map_err(|_| BookingValidationError::InvalidFormat { field: "place" })?;

        Ok(Self {
            place,
            check_in,
            check_out,
            nights,
            number_of_guests,
            name,
            phone,
            declared_price: request.price.as_ref().and_then(|price| price.to_i64().ok()),
        })
    }

    pub fn place(&self) -> PlaceId {
        self.place
    }

    /// Calendar days between check-in and check-out. Always at least one.
    pub fn nights(&self) -> u32 {
        self.nights
    }

    /// What the client claimed the stay would cost, if it sent a number.
    pub fn declared_price(&self) -> Option<i64> {
        self.declared_price
    }

    /// Server-side total: nights times the nightly rate.
    pub fn total_price(&self, price_per_night: u32) -> Result<u64, BookingValidationError> {
        u64::from(self.nights())
            .checked_mul(u64::from(price_per_night))
            .ok_or(BookingValidationError::InvalidRange { field: "checkOut" })
    }

    /// Fix the booking to `user` at the given total.
    pub fn into_booking(self, id: BookingId, user: UserId, price: u64) -> Booking {
        Booking {
            id,
            place: self.place,
            user,
            check_in: self.check_in,
            check_out: self.check_out,
            number_of_guests: self.number_of_guests,
            name: self.name,
            phone: self.phone,
            price,
        }
    }
}

/// Stored reservation.
///
/// ## Invariants
/// - `check_out > check_in`.
/// - `number_of_guests >= 1`.
/// - `price` was computed by the server at creation.
/// - `user` is the identity that created the booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    place: PlaceId,
    user: UserId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    number_of_guests: u16,
    name: String,
    phone: String,
    price: u64,
}

impl Booking {
    /// Rebuild a booking from storage.
    #[expect(clippy::too_many_arguments, reason = "mirrors the stored row")]
    pub fn from_parts(
        id: BookingId,
        place: PlaceId,
        user: UserId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        number_of_guests: u16,
        name: String,
        phone: String,
        price: u64,
    ) -> Self {
        Self {
            id,
            place,
            user,
            check_in,
            check_out,
            number_of_guests,
            name,
            phone,
            price,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn place(&self) -> PlaceId {
        self.place
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn number_of_guests(&self) -> u16 {
        self.number_of_guests
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    fn view<'a, P: Serialize>(&'a self, place: &'a P) -> BookingView<'a, P> {
        BookingView {
            id: self.id,
            place,
            user: &self.user,
            check_in: self.check_in,
            check_out: self.check_out,
            number_of_guests: self.number_of_guests,
            name: &self.name,
            phone: &self.phone,
            price: self.price,
        }
    }
}

/// A booking with its place expanded, as listed to the guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithPlace {
    booking: Booking,
    place: Place,
}

impl BookingWithPlace {
    pub fn new(booking: Booking, place: Place) -> Self {
        Self { booking, place }
    }

    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    pub fn place(&self) -> &Place {
        &self.place
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingView<'a, P: Serialize> {
    id: BookingId,
    place: &'a P,
    user: &'a UserId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    number_of_guests: u16,
    name: &'a str,
    phone: &'a str,
    price: u64,
}

impl Serialize for Booking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view(&self.place).serialize(serializer)
    }
}

impl Serialize for BookingWithPlace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.booking.view(&self.place).serialize(serializer)
    }
}
