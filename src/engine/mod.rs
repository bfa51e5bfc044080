//! Booking consistency engine.
//!
//! The only path that may write a booking interactively. Every commit checks
//! the capacity of its (room, check-in date) slot and persists inside one
//! transaction while holding the store's write gate, so two commits can never
//! both observe `capacity - 1` and both insert.

mod capacity;

pub use capacity::{prospective_occupancy, CapacityCheck, Slot};

use serde::Serialize;
use sqlx::SqliteConnection;

use crate::db::bookings::{self, BookingRow};
use crate::db::{rooms, users, Store};
use crate::error::{AppError, Result};
use crate::models::{BookingDraft, Room};

/// Id and resolved total of a booking that was written
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommittedBooking {
    pub id: i64,
    pub total: f64,
}

#[derive(Clone, Debug)]
pub struct BookingEngine {
    store: Store,
}

impl BookingEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Nightly price of a room
    pub async fn price_for(&self, room_id: i64) -> Result<f64> {
        let room = rooms::find_room(self.store.pool(), room_id)
            .await?
            .ok_or_else(|| AppError::room_not_found(room_id))?;
        Ok(room.price)
    }

    /// `price × nights`, used when the caller supplies no usable total
    pub async fn default_total(&self, room_id: i64, nights: i64) -> Result<f64> {
        let price = self.price_for(room_id).await?;
        Ok(derive_total(price, nights))
    }

    /// Bookings stored for exactly this room and check-in date
    pub async fn occupancy(&self, room_id: i64, checkin_date: &str) -> Result<i64> {
        bookings::count_for_slot(self.store.pool(), room_id, checkin_date).await
    }

    /// Evaluate a prospective booking without writing anything
    ///
    /// `excluding_booking_id` names the booking being edited, if any.
    pub async fn check_capacity(
        &self,
        room_id: i64,
        checkin_date: &str,
        excluding_booking_id: Option<i64>,
    ) -> Result<CapacityCheck> {
        let mut conn = self.store.pool().acquire().await?;
        let room = rooms::find_room(&mut *conn, room_id)
            .await?
            .ok_or_else(|| AppError::room_not_found(room_id))?;
        evaluate_capacity(&mut conn, &room, checkin_date, excluding_booking_id).await
    }

    /// True iff committing the booking would put its slot over capacity
    pub async fn will_exceed_capacity(
        &self,
        room_id: i64,
        checkin_date: &str,
        excluding_booking_id: Option<i64>,
    ) -> Result<bool> {
        let check = self
            .check_capacity(room_id, checkin_date, excluding_booking_id)
            .await?;
        Ok(check.exceeds())
    }

    /// Validate and persist a booking, inserting it or rewriting `editing_booking_id`
    ///
    /// Fails without writing when the user, room or edited booking is missing,
    /// or when the target slot is full.
    pub async fn commit_booking(
        &self,
        draft: &BookingDraft,
        editing_booking_id: Option<i64>,
    ) -> Result<CommittedBooking> {
        let _gate = self.store.lock_writes().await;
        let mut tx = self.store.begin().await?;

        // 1. Resolve user and room
        if users::find_user(&mut *tx, draft.user_id).await?.is_none() {
            return Err(AppError::user_not_found(draft.user_id));
        }
        let room = rooms::find_room(&mut *tx, draft.room_id)
            .await?
            .ok_or_else(|| AppError::room_not_found(draft.room_id))?;

        // 2. Resolve total
        let total = draft
            .total
            .unwrap_or_else(|| derive_total(room.price, draft.nights));

        // 3. Capacity
        let check =
            evaluate_capacity(&mut tx, &room, &draft.checkin_date, editing_booking_id).await?;
        if check.exceeds() {
            tracing::warn!(
                "Room {} full on {}: capacity {}, {} already booked",
                room.id,
                draft.checkin_date,
                check.capacity,
                check.occupancy
            );
            return Err(check.into_error());
        }

        // 4. Persist
        let row = BookingRow {
            user_id: draft.user_id,
            room_id: draft.room_id,
            checkin_date: &draft.checkin_date,
            nights: draft.nights,
            total,
        };
        let id = match editing_booking_id {
            Some(id) => {
                bookings::update_booking(&mut *tx, id, &row).await?;
                id
            }
            None => bookings::insert_booking(&mut *tx, &row).await?,
        };
        tx.commit().await?;

        tracing::info!(
            "Committed booking {} (room {}, {}, {} nights, total {})",
            id,
            draft.room_id,
            draft.checkin_date,
            draft.nights,
            total
        );

        Ok(CommittedBooking { id, total })
    }

    pub async fn delete_booking(&self, id: i64) -> Result<()> {
        let _gate = self.store.lock_writes().await;
        bookings::delete_booking(self.store.pool(), id).await?;
        tracing::info!("Deleted booking {}", id);
        Ok(())
    }
}

fn derive_total(price: f64, nights: i64) -> f64 {
    price * nights as f64
}

/// Capacity arithmetic for placing a booking into `room` on `checkin_date`
async fn evaluate_capacity(
    conn: &mut SqliteConnection,
    room: &Room,
    checkin_date: &str,
    excluding_booking_id: Option<i64>,
) -> Result<CapacityCheck> {
    let prior = match excluding_booking_id {
        Some(id) => Some(
            bookings::find_booking(&mut *conn, id)
                .await?
                .ok_or_else(|| AppError::booking_not_found(id))?,
        ),
        None => None,
    };
    let occupancy = bookings::count_for_slot(&mut *conn, room.id, checkin_date).await?;

    let prior_slot = prior.as_ref().map(|b| Slot {
        room_id: b.room_id,
        checkin_date: &b.checkin_date,
    });
    let target = Slot {
        room_id: room.id,
        checkin_date,
    };

    Ok(CapacityCheck::new(room.capacity, occupancy, prior_slot, target))
}
