//! Read-only aggregate queries backing the reports screen.

use serde::Serialize;
use sqlx::{Executor, Sqlite};

use crate::error::Result;

/// Number of bookings made against one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RoomBookingCount {
    pub room_id: i64,
    pub room_name: String,
    pub bookings: i64,
}

/// A booking ranked by its total
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TopBooking {
    pub id: i64,
    pub user_name: String,
    pub room_name: String,
    pub total: f64,
}

/// Booking counts for every room that has at least one booking, busiest first
///
/// `limit` of `None` returns every such room.
pub async fn bookings_per_room<'e, E>(executor: E, limit: Option<i64>) -> Result<Vec<RoomBookingCount>>
where
    E: Executor<'e, Database = Sqlite>,
{
    // SQLite treats a negative LIMIT as "no limit"
    let rows = sqlx::query_as::<_, RoomBookingCount>(
        "SELECT r.id AS room_id, r.name AS room_name, COUNT(b.id) AS bookings \
         FROM bookings b JOIN rooms r ON b.room_id = r.id \
         GROUP BY r.id, r.name \
         ORDER BY bookings DESC, r.name \
         LIMIT ?",
    )
    .bind(limit.unwrap_or(-1))
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// The highest-value bookings with their user and room names
pub async fn top_bookings<'e, E>(executor: E, limit: i64) -> Result<Vec<TopBooking>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, TopBooking>(
        "SELECT b.id, u.name AS user_name, r.name AS room_name, b.total \
         FROM bookings b \
         JOIN users u ON b.user_id = u.id \
         JOIN rooms r ON b.room_id = r.id \
         ORDER BY b.total DESC, b.id \
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}
