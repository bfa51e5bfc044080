use sqlx::{Executor, Sqlite};

use crate::error::{AppError, Result};
use crate::models::{Booking, BookingDetail};

const DETAIL_SELECT: &str = "SELECT b.id, b.user_id, u.name AS user_name, b.room_id, \
     r.name AS room_name, b.checkin_date, b.nights, b.total \
     FROM bookings b \
     JOIN users u ON b.user_id = u.id \
     JOIN rooms r ON b.room_id = r.id";

/// Fully resolved booking values, written as one row
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRow<'a> {
    pub user_id: i64,
    pub room_id: i64,
    pub checkin_date: &'a str,
    pub nights: i64,
    pub total: f64,
}

/// All bookings with user and room names, latest check-in first
pub async fn list_bookings<'e, E>(executor: E) -> Result<Vec<BookingDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{DETAIL_SELECT} ORDER BY b.checkin_date DESC, b.id DESC");
    let bookings = sqlx::query_as::<_, BookingDetail>(&sql)
        .fetch_all(executor)
        .await?;
    Ok(bookings)
}

/// Bookings held by one user
pub async fn bookings_for_user<'e, E>(executor: E, user_id: i64) -> Result<Vec<BookingDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{DETAIL_SELECT} WHERE b.user_id = ? ORDER BY b.checkin_date, b.id");
    let bookings = sqlx::query_as::<_, BookingDetail>(&sql)
        .bind(user_id)
        .fetch_all(executor)
        .await?;
    Ok(bookings)
}

/// Bookings made against one room
pub async fn bookings_for_room<'e, E>(executor: E, room_id: i64) -> Result<Vec<BookingDetail>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{DETAIL_SELECT} WHERE b.room_id = ? ORDER BY b.checkin_date, b.id");
    let bookings = sqlx::query_as::<_, BookingDetail>(&sql)
        .bind(room_id)
        .fetch_all(executor)
        .await?;
    Ok(bookings)
}

/// Raw booking rows in id order, as exported
pub async fn all_bookings<'e, E>(executor: E) -> Result<Vec<Booking>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT id, user_id, room_id, checkin_date, nights, total FROM bookings ORDER BY id",
    )
    .fetch_all(executor)
    .await?;
    Ok(bookings)
}

pub async fn find_booking<'e, E>(executor: E, id: i64) -> Result<Option<Booking>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let booking = sqlx::query_as::<_, Booking>(
        "SELECT id, user_id, room_id, checkin_date, nights, total FROM bookings WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(booking)
}

/// Number of bookings sharing exactly this (room, check-in date) pair
pub async fn count_for_slot<'e, E>(executor: E, room_id: i64, checkin_date: &str) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings WHERE room_id = ? AND checkin_date = ?",
    )
    .bind(room_id)
    .bind(checkin_date)
    .fetch_one(executor)
    .await?;
    Ok(count)
}

pub async fn insert_booking<'e, E>(executor: E, row: &BookingRow<'_>) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO bookings (user_id, room_id, checkin_date, nights, total) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(row.user_id)
    .bind(row.room_id)
    .bind(row.checkin_date)
    .bind(row.nights)
    .bind(row.total)
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_booking<'e, E>(executor: E, id: i64, row: &BookingRow<'_>) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "UPDATE bookings SET user_id = ?, room_id = ?, checkin_date = ?, nights = ?, total = ? \
         WHERE id = ?",
    )
    .bind(row.user_id)
    .bind(row.room_id)
    .bind(row.checkin_date)
    .bind(row.nights)
    .bind(row.total)
    .bind(id)
    .execute(executor)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::booking_not_found(id));
    }
    Ok(())
}

pub async fn delete_booking<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::booking_not_found(id));
    }
    Ok(())
}

pub async fn count_bookings<'e, E>(executor: E) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
        .fetch_one(executor)
        .await?;
    Ok(count)
}
