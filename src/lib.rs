//! Room booking server library
//!
//! Customers, rooms and bookings over SQLite, with a booking consistency
//! engine that keeps every (room, check-in date) within the room's capacity.

pub mod bulk;
pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

pub use config::Config;
pub use db::{open_store, Store};
pub use engine::BookingEngine;
pub use error::{AppError, Result};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub engine: BookingEngine,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState; the engine shares the given store
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            engine: BookingEngine::new(store.clone()),
            store,
            config,
        }
    }
}
