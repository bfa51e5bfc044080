use sqlx::{Executor, Sqlite};

use crate::error::{AppError, Result};
use crate::models::{NewRoom, Room};

/// All rooms ordered by name
pub async fn list_rooms<'e, E>(executor: E) -> Result<Vec<Room>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rooms =
        sqlx::query_as::<_, Room>("SELECT id, name, capacity, price FROM rooms ORDER BY name")
            .fetch_all(executor)
            .await?;
    Ok(rooms)
}

pub async fn find_room<'e, E>(executor: E, id: i64) -> Result<Option<Room>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let room = sqlx::query_as::<_, Room>("SELECT id, name, capacity, price FROM rooms WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(room)
}

/// Insert a room and return its id; a duplicate name is a constraint violation
pub async fn insert_room<'e, E>(executor: E, room: &NewRoom) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO rooms (name, capacity, price) VALUES (?, ?, ?)")
        .bind(&room.name)
        .bind(room.capacity)
        .bind(room.price)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_room<'e, E>(executor: E, id: i64, room: &NewRoom) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE rooms SET name = ?, capacity = ?, price = ? WHERE id = ?")
        .bind(&room.name)
        .bind(room.capacity)
        .bind(room.price)
        .bind(id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::room_not_found(id));
    }
    Ok(())
}

/// Delete a room; its bookings go with it through the cascade
pub async fn delete_room<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::room_not_found(id));
    }
    Ok(())
}

/// Ids of every room, for foreign-key checks during bulk import
pub async fn room_ids<'e, E>(executor: E) -> Result<Vec<i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM rooms")
        .fetch_all(executor)
        .await?;
    Ok(ids)
}

pub async fn count_rooms<'e, E>(executor: E) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms")
        .fetch_one(executor)
        .await?;
    Ok(count)
}
