pub mod bookings;
pub mod health;
pub mod reports;
pub mod rooms;
pub mod transfer;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::AppError;
use crate::AppState;

pub use bookings::{check_booking, create_booking, delete_booking, get_booking, list_bookings, update_booking};
pub use health::health_check;
pub use reports::{bookings_per_room, top_bookings, top_rooms};
pub use rooms::{create_room, delete_room, get_room, list_rooms, quote_room, update_room};
pub use transfer::{export_entity, import_entity};
pub use users::{create_user, delete_user, get_user, list_users, update_user};

/// Build the API router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/rooms", get(list_rooms).post(create_room))
        .route(
            "/api/rooms/:id",
            get(get_room).put(update_room).delete(delete_room),
        )
        .route("/api/rooms/:id/quote", get(quote_room))
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/check", post(check_booking))
        .route(
            "/api/bookings/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/api/reports/bookings-per-room", get(bookings_per_room))
        .route("/api/reports/top-rooms", get(top_rooms))
        .route("/api/reports/top-bookings", get(top_bookings))
        .route("/api/import/:entity", post(import_entity))
        .route("/api/export/:entity", get(export_entity))
        .with_state(state)
}

/// A form field as typed by the user
///
/// Forms carry text, but JSON clients often send bare numbers; both are
/// handed to the validation layer as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl RawField {
    pub fn to_text(&self) -> String {
        match self {
            RawField::Text(s) => s.clone(),
            RawField::Integer(n) => n.to_string(),
            RawField::Float(x) => x.to_string(),
        }
    }
}

/// JSON request body whose rejections are reported as `AppError::Validation`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
