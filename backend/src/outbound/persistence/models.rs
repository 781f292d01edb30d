//! Diesel row structs. Internal to the persistence layer; repositories
//! convert them to domain types before returning.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingId, EmailAddress, NumericInput, Place, PlaceDraft, PlaceFields, PlaceId, User,
    UserId, UserName,
};

use super::schema::{bookings, places, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl UserRow {
    /// Rebuild the domain user, re-validating stored text.
    pub(crate) fn to_user(&self) -> Result<User, String> {
        let name = UserName::new(&self.name).map_err(|err| err.to_string())?;
        let email = EmailAddress::new(&self.email).map_err(|err| err.to_string())?;
        Ok(User::new(UserId::from_uuid(self.id), name, email))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub address: String,
    pub photos: Vec<String>,
    pub description: String,
    pub perks: Vec<String>,
    pub extra_info: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub max_guests: i32,
    pub price: i32,
}

impl PlaceRow {
    /// Rebuild the domain place by running stored fields through validation.
    pub(crate) fn into_place(self) -> Result<Place, String> {
        let fields = PlaceFields::try_from_draft(PlaceDraft {
            title: Some(self.title),
            address: Some(self.address),
            photos: self.photos,
            description: Some(self.description),
            perks: self.perks,
            extra_info: Some(self.extra_info),
            check_in: self.check_in,
            check_out: self.check_out,
            max_guests: Some(NumericInput::from(i64::from(self.max_guests))),
            price: Some(NumericInput::from(i64::from(self.price))),
        })
        .map_err(|err| format!("stored place {} is invalid: {err}", self.id))?;
        Ok(Place::new(
            PlaceId::from_uuid(self.id),
            UserId::from_uuid(self.owner_id),
            fields,
        ))
    }
}

/// Column values written on insert; also the changeset for owner updates.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = places)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PlaceValues<'a> {
    pub title: &'a str,
    pub address: &'a str,
    pub photos: &'a [String],
    pub description: &'a str,
    pub perks: Vec<&'static str>,
    pub extra_info: &'a str,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub max_guests: i32,
    pub price: i32,
}

impl<'a> PlaceValues<'a> {
    pub(crate) fn from_fields(fields: &'a PlaceFields) -> Result<Self, String> {
        let price = i32::try_from(fields.price())
            .map_err(|_| format!("price {} does not fit the price column", fields.price()))?;
        Ok(Self {
            title: fields.title(),
            address: fields.address(),
            photos: fields.photos(),
            description: fields.description(),
            perks: fields.perks().iter().map(|perk| perk.as_str()).collect(),
            extra_info: fields.extra_info(),
            check_in: fields.check_in().map(String::from),
            check_out: fields.check_out().map(String::from),
            max_guests: i32::from(fields.max_guests()),
            price,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = places)]
pub(crate) struct NewPlaceRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[diesel(embed)]
    pub values: PlaceValues<'a>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: i32,
    pub name: String,
    pub phone: String,
    pub price: i64,
}

impl BookingRow {
    pub(crate) fn into_booking(self) -> Result<Booking, String> {
        let guests = u16::try_from(self.number_of_guests)
            .map_err(|_| format!("booking {} has invalid guest count", self.id))?;
        let price = u64::try_from(self.price)
            .map_err(|_| format!("booking {} has a negative price", self.id))?;
        Ok(Booking::from_parts(
            BookingId::from_uuid(self.id),
            PlaceId::from_uuid(self.place_id),
            UserId::from_uuid(self.user_id),
            self.check_in,
            self.check_out,
            guests,
            self.name,
            self.phone,
            price,
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub number_of_guests: i32,
    pub name: &'a str,
    pub phone: &'a str,
    pub price: i64,
}

impl<'a> NewBookingRow<'a> {
    pub(crate) fn from_booking(booking: &'a Booking) -> Result<Self, String> {
        let price = i64::try_from(booking.price())
            .map_err(|_| format!("price {} does not fit the price column", booking.price()))?;
        Ok(Self {
            id: *booking.id().as_uuid(),
            place_id: *booking.place().as_uuid(),
            user_id: *booking.user().as_uuid(),
            check_in: booking.check_in(),
            check_out: booking.check_out(),
            number_of_guests: i32::from(booking.number_of_guests()),
            name: booking.name(),
            phone: booking.phone(),
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Perk;
    use rstest::rstest;

    fn place_row() -> PlaceRow {
        PlaceRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Cabin".into(),
            address: "1 Lake Road".into(),
            photos: vec!["a.jpg".into()],
            description: String::new(),
            perks: vec!["wifi".into(), "parking".into()],
            extra_info: String::new(),
            check_in: Some("14:00".into()),
            check_out: None,
            max_guests: 3,
            price: 120,
        }
    }

    #[rstest]
    fn place_rows_round_trip_through_values() {
        let place = place_row().into_place().expect("valid row");
        assert_eq!(place.fields().perks(), &[Perk::Wifi, Perk::Parking]);

        let values = PlaceValues::from_fields(place.fields()).expect("fits columns");
        assert_eq!(values.perks, vec!["wifi", "parking"]);
        assert_eq!(values.check_in.as_deref(), Some("14:00"));
        assert_eq!(values.check_out, None);
        assert_eq!(values.price, 120);
    }

    #[rstest]
    fn corrupt_place_rows_are_rejected() {
        let mut row = place_row();
        row.max_guests = 0;
        let err = row.into_place().expect_err("zero guests");
        assert!(err.contains("maxGuests"));
    }

    #[rstest]
    fn negative_booking_price_is_rejected() {
        let row = BookingRow {
            id: Uuid::new_v4(),
            place_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            check_in: NaiveDate::from_ymd_opt(2024, 5, 1).expect("date"),
            check_out: NaiveDate::from_ymd_opt(2024, 5, 2).expect("date"),
            number_of_guests: 1,
            name: "Ada".into(),
            phone: "1234567890".into(),
            price: -1,
        };
        assert!(row.into_booking().is_err());
    }
}
