use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{JsonBody, RawField};
use crate::db::{bookings, rooms};
use crate::error::{AppError, Result};
use crate::models::{Room, RoomDetails};
use crate::validation::{parse_positive_int, validate_room};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RoomForm {
    pub name: String,
    pub capacity: RawField,
    pub price: RawField,
}

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub nights: String,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub room_id: i64,
    pub nights: i64,
    pub total: f64,
}

/// List rooms ordered by name
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>> {
    Ok(Json(rooms::list_rooms(state.store.pool()).await?))
}

/// A room with every booking made against it
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RoomDetails>> {
    let pool = state.store.pool();
    let room = rooms::find_room(pool, id)
        .await?
        .ok_or_else(|| AppError::room_not_found(id))?;
    let bookings = bookings::bookings_for_room(pool, id).await?;
    Ok(Json(RoomDetails { room, bookings }))
}

/// Create a room
///
/// Returns 409 Conflict if a room with the same name exists.
pub async fn create_room(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<RoomForm>,
) -> Result<(StatusCode, Json<Room>)> {
    let room = validate_room(&form.name, &form.capacity.to_text(), &form.price.to_text())?;
    let _gate = state.store.lock_writes().await;
    let id = rooms::insert_room(state.store.pool(), &room).await?;
    tracing::info!("Created room {} ({})", id, room.name);

    Ok((
        StatusCode::CREATED,
        Json(Room {
            id,
            name: room.name,
            capacity: room.capacity,
            price: room.price,
        }),
    ))
}

/// Rewrite a room
///
/// Lowering the capacity does not touch bookings already stored.
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(form): JsonBody<RoomForm>,
) -> Result<Json<Room>> {
    let room = validate_room(&form.name, &form.capacity.to_text(), &form.price.to_text())?;
    let _gate = state.store.lock_writes().await;
    rooms::update_room(state.store.pool(), id, &room).await?;
    tracing::info!("Updated room {}", id);

    Ok(Json(Room {
        id,
        name: room.name,
        capacity: room.capacity,
        price: room.price,
    }))
}

/// Delete a room and, through the cascade, all of its bookings
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let _gate = state.store.lock_writes().await;
    rooms::delete_room(state.store.pool(), id).await?;
    tracing::info!("Deleted room {} and its bookings", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Price a stay: `GET /api/rooms/:id/quote?nights=N`
pub async fn quote_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResponse>> {
    let nights = parse_positive_int(&params.nights).ok_or_else(|| {
        AppError::Validation("nights must be a positive whole number".to_string())
    })?;
    let total = state.engine.default_total(id, nights).await?;

    Ok(Json(QuoteResponse {
        room_id: id,
        nights,
        total,
    }))
}
