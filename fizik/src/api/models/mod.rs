//! Request and response types for the HTTP API.

pub mod auth;
pub mod exercises;
pub mod history;
pub mod users;
pub mod workouts;
