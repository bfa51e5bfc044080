use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::constants::{DEFAULT_TOP_BOOKINGS_LIMIT, MAX_REPORT_LIMIT, TOP_ROOMS_LIMIT};
use crate::db::reports::{self, RoomBookingCount, TopBooking};
use crate::error::{AppError, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Booking count per room, busiest first
pub async fn bookings_per_room(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomBookingCount>>> {
    Ok(Json(reports::bookings_per_room(state.store.pool(), None).await?))
}

/// The busiest rooms
pub async fn top_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomBookingCount>>> {
    Ok(Json(
        reports::bookings_per_room(state.store.pool(), Some(TOP_ROOMS_LIMIT)).await?,
    ))
}

/// Highest-value bookings: `GET /api/reports/top-bookings?limit=N`
pub async fn top_bookings(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<TopBooking>>> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_BOOKINGS_LIMIT);
    if !(1..=MAX_REPORT_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_REPORT_LIMIT}"
        )));
    }
    Ok(Json(reports::top_bookings(state.store.pool(), limit).await?))
}
