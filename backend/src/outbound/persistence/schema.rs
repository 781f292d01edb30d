//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts and their password hashes.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Normalised (trimmed, lower-cased) and unique.
        email -> Text,
        /// PHC-encoded Argon2id hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rentable listings. `owner_id` never changes after insert.
    places (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Text,
        address -> Text,
        photos -> Array<Text>,
        description -> Text,
        perks -> Array<Text>,
        extra_info -> Text,
        /// `HH:MM`, or null when unset.
        check_in -> Nullable<Varchar>,
        check_out -> Nullable<Varchar>,
        max_guests -> Int4,
        price -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Confirmed reservations with the price fixed at creation.
    bookings (id) {
        id -> Uuid,
        place_id -> Uuid,
        user_id -> Uuid,
        check_in -> Date,
        check_out -> Date,
        number_of_guests -> Int4,
        name -> Text,
        phone -> Varchar,
        price -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(places -> users (owner_id));
diesel::joinable!(bookings -> places (place_id));

diesel::allow_tables_to_appear_in_same_query!(users, places, bookings);
