use serde::{Deserialize, Serialize};

use super::booking::BookingDetail;

/// Rentable room as stored in the `rooms` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: i64,
    pub name: String,
    /// Maximum bookings sharing one check-in date
    pub capacity: i64,
    /// Nightly rate
    pub price: f64,
}

/// Validated room fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub name: String,
    pub capacity: i64,
    pub price: f64,
}

/// A room together with every booking made against it
#[derive(Debug, Clone, Serialize)]
pub struct RoomDetails {
    #[serde(flatten)]
    pub room: Room,
    pub bookings: Vec<BookingDetail>,
}
