use serde::{Deserialize, Serialize};

use super::booking::BookingDetail;

/// Customer row as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Always lowercase, unique across users
    pub email: String,
    pub phone: Option<String>,
}

/// Validated user fields ready to be inserted or written over an existing row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A user together with every booking they hold
#[derive(Debug, Clone, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub bookings: Vec<BookingDetail>,
}
