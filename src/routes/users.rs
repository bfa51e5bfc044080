use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::JsonBody;
use crate::db::{bookings, users};
use crate::error::{AppError, Result};
use crate::models::{User, UserDetails};
use crate::validation::validate_user;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// List users ordered by name
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(users::list_users(state.store.pool()).await?))
}

/// A user with every booking they hold
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDetails>> {
    let pool = state.store.pool();
    let user = users::find_user(pool, id)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;
    let bookings = bookings::bookings_for_user(pool, id).await?;
    Ok(Json(UserDetails { user, bookings }))
}

/// Create a user
///
/// Returns 409 Conflict if the (lowercased) email is already registered.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<UserForm>,
) -> Result<(StatusCode, Json<User>)> {
    let user = validate_user(&form.name, &form.email, form.phone.as_deref())?;
    let _gate = state.store.lock_writes().await;
    let id = users::insert_user(state.store.pool(), &user).await?;
    tracing::info!("Created user {}", id);

    Ok((
        StatusCode::CREATED,
        Json(User {
            id,
            name: user.name,
            email: user.email,
            phone: user.phone,
        }),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(form): JsonBody<UserForm>,
) -> Result<Json<User>> {
    let user = validate_user(&form.name, &form.email, form.phone.as_deref())?;
    let _gate = state.store.lock_writes().await;
    users::update_user(state.store.pool(), id, &user).await?;
    tracing::info!("Updated user {}", id);

    Ok(Json(User {
        id,
        name: user.name,
        email: user.email,
        phone: user.phone,
    }))
}

/// Delete a user and, through the cascade, all of their bookings
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let _gate = state.store.lock_writes().await;
    users::delete_user(state.store.pool(), id).await?;
    tracing::info!("Deleted user {} and their bookings", id);
    Ok(StatusCode::NO_CONTENT)
}
