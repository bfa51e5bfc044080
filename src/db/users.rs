use sqlx::{Executor, Sqlite};

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

/// All users ordered by name
pub async fn list_users<'e, E>(executor: E) -> Result<Vec<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let users = sqlx::query_as::<_, User>("SELECT id, name, email, phone FROM users ORDER BY name")
        .fetch_all(executor)
        .await?;
    Ok(users)
}

pub async fn find_user<'e, E>(executor: E, id: i64) -> Result<Option<User>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let user = sqlx::query_as::<_, User>("SELECT id, name, email, phone FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

/// Insert a user and return its id; a duplicate email is a constraint violation
pub async fn insert_user<'e, E>(executor: E, user: &NewUser) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO users (name, email, phone) VALUES (?, ?, ?)")
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_user<'e, E>(executor: E, id: i64, user: &NewUser) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE users SET name = ?, email = ?, phone = ? WHERE id = ?")
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::user_not_found(id));
    }
    Ok(())
}

/// Delete a user; their bookings go with them through the cascade
pub async fn delete_user<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::user_not_found(id));
    }
    Ok(())
}

/// Ids of every user, for foreign-key checks during bulk import
pub async fn user_ids<'e, E>(executor: E) -> Result<Vec<i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM users")
        .fetch_all(executor)
        .await?;
    Ok(ids)
}

pub async fn count_users<'e, E>(executor: E) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await?;
    Ok(count)
}
