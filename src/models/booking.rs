use serde::{Deserialize, Serialize};

/// Booking row as stored in the `bookings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    /// Opaque date text; occupancy is keyed on exact equality of this value
    pub checkin_date: String,
    pub nights: i64,
    pub total: f64,
}

/// Booking joined with the names of its user and room, for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingDetail {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub room_id: i64,
    pub room_name: String,
    pub checkin_date: String,
    pub nights: i64,
    pub total: f64,
}

/// Booking form fields after the validation layer has parsed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingFields {
    pub checkin_date: String,
    pub nights: i64,
}

/// A booking about to be committed
///
/// `total` is `None` when the caller left it blank or typed something that is
/// not a number; the engine then derives it from the room price.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub user_id: i64,
    pub room_id: i64,
    pub checkin_date: String,
    pub nights: i64,
    pub total: Option<f64>,
}
