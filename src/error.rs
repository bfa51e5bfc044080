use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Capacity exceeded: room holds {capacity}, {occupancy} already booked")]
    CapacityExceeded { capacity: i64, occupancy: i64 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

impl AppError {
    pub fn user_not_found(id: i64) -> Self {
        AppError::NotFound { entity: "User", id }
    }

    pub fn room_not_found(id: i64) -> Self {
        AppError::NotFound { entity: "Room", id }
    }

    pub fn booking_not_found(id: i64) -> Self {
        AppError::NotFound { entity: "Booking", id }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Store failures caused by a violated uniqueness or foreign-key rule are
/// reported as constraint violations; everything else stays a database error.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return AppError::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::Csv(ref e) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Cannot read CSV: {e}") }),
            ),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            AppError::CapacityExceeded {
                capacity,
                occupancy,
            } => (
                StatusCode::CONFLICT,
                json!({
                    "error": format!(
                        "This room can only take {capacity} people. {occupancy} already booked for this date."
                    ),
                    "capacity": capacity,
                    "occupancy": occupancy,
                }),
            ),
            AppError::ConstraintViolation(ref msg) => {
                tracing::warn!("Constraint violation: {}", msg);
                (
                    StatusCode::CONFLICT,
                    json!({ "error": "Record conflicts with existing data (duplicate or missing reference)" }),
                )
            }
            AppError::MissingColumns(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(AppError::room_not_found(7).to_string(), "Room 7 not found");
        assert_eq!(AppError::user_not_found(3).to_string(), "User 3 not found");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::booking_not_found(1), StatusCode::NOT_FOUND),
            (
                AppError::CapacityExceeded {
                    capacity: 2,
                    occupancy: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                AppError::ConstraintViolation("UNIQUE constraint failed".into()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::MissingColumns(vec!["email"]),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_non_constraint_sqlx_error_stays_database() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
