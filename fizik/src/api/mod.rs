//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`json`]**: JSON body extractor that reports rejections in the API error shape
//!
//! # API Structure
//!
//! Everything is served under `/api`:
//!
//! - **Health** (`/api/health`): Liveness check, no authentication
//! - **Authentication** (`/api/auth/*`, `/api/me`): Registration, login, password change
//! - **Workouts** (`/api/workouts/*`): CRUD over the caller's own workouts
//! - **History** (`/api/history`): Per-exercise weight series and personal best
//! - **Exercises** (`/api/exercises`): Exercise name suggestions
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa`. The rendered reference lives at `/docs`.

pub mod handlers;
pub mod json;
pub mod models;
