use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{JsonBody, RawField};
use crate::db::bookings;
use crate::engine::CommittedBooking;
use crate::error::{AppError, Result};
use crate::models::{Booking, BookingDetail, BookingDraft};
use crate::validation::{clean_field, parse_total, validate_booking_fields};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub user_id: i64,
    pub room_id: i64,
    pub checkin_date: String,
    pub nights: RawField,
    /// Blank, missing or non-numeric means "derive from the room price"
    #[serde(default)]
    pub total: Option<RawField>,
}

impl BookingForm {
    /// Run the form through the validation layer
    fn into_draft(self) -> Result<BookingDraft> {
        let fields = validate_booking_fields(&self.checkin_date, &self.nights.to_text())?;
        let total = parse_total(self.total.map(|t| t.to_text()).as_deref());

        Ok(BookingDraft {
            user_id: self.user_id,
            room_id: self.room_id,
            checkin_date: fields.checkin_date,
            nights: fields.nights,
            total,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    pub room_id: i64,
    pub checkin_date: String,
    /// The booking being edited, if any
    #[serde(default)]
    pub booking_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CapacityResponse {
    pub fits: bool,
    pub capacity: i64,
    pub occupancy: i64,
}

/// List bookings with user and room names, latest check-in first
pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<BookingDetail>>> {
    Ok(Json(bookings::list_bookings(state.store.pool()).await?))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>> {
    let booking = bookings::find_booking(state.store.pool(), id)
        .await?
        .ok_or_else(|| AppError::booking_not_found(id))?;
    Ok(Json(booking))
}

/// Create a booking
///
/// Returns 409 Conflict with the room's capacity and current occupancy when
/// the room is already full for that check-in date.
pub async fn create_booking(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<BookingForm>,
) -> Result<(StatusCode, Json<CommittedBooking>)> {
    let draft = form.into_draft()?;
    let committed = state.engine.commit_booking(&draft, None).await?;
    Ok((StatusCode::CREATED, Json(committed)))
}

/// Rewrite a booking; keeping its room and date never trips the capacity check
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(form): JsonBody<BookingForm>,
) -> Result<Json<CommittedBooking>> {
    let draft = form.into_draft()?;
    let committed = state.engine.commit_booking(&draft, Some(id)).await?;
    Ok(Json(committed))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.engine.delete_booking(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// "Would this fit?" pre-check; never writes
pub async fn check_booking(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<CapacityQuery>,
) -> Result<Json<CapacityResponse>> {
    let checkin_date = clean_field(&query.checkin_date);
    if checkin_date.is_empty() {
        return Err(AppError::Validation("Check-in date required".to_string()));
    }

    let check = state
        .engine
        .check_capacity(query.room_id, &checkin_date, query.booking_id)
        .await?;

    Ok(Json(CapacityResponse {
        fits: check.fits(),
        capacity: check.capacity,
        occupancy: check.occupancy,
    }))
}
