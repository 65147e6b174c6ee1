//! HTTP request handlers for all API endpoints.
//!
//! Handlers stay thin: they extract the caller, parse the request, and hand
//! off to a service ([`crate::auth::service::AuthService`],
//! [`crate::workouts::WorkoutService`]) or the pure [`crate::history`] functions.
//!
//! # Handler Modules
//!
//! - [`auth`]: Registration, login, password change and the current user
//! - [`exercises`]: Exercise name suggestions
//! - [`health`]: Liveness check
//! - [`history`]: Weight-over-time history for one exercise
//! - [`workouts`]: Workout CRUD scoped to the authenticated owner

pub mod auth;
pub mod exercises;
pub mod health;
pub mod history;
pub mod workouts;
