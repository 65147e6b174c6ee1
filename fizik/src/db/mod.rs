//! Persistence layer.
//!
//! ```text
//! ┌──────────────────┐
//! │ Services         │  (auth::service, workouts)
//! └────────┬─────────┘
//!          │  store traits (db::store)
//!          ↓
//! ┌──────────────────┐      ┌──────────────┐
//! │ PgStore          │      │ MemoryStore  │
//! └────────┬─────────┘      └──────────────┘
//!          ↓
//! ┌──────────────────┐
//! │ Repositories     │  (db::handlers)
//! └────────┬─────────┘
//!          ↓
//!      PostgreSQL
//! ```
//!
//! # Modules
//!
//! - [`store`]: the [`store::UserStore`] / [`store::WorkoutStore`] traits and the Postgres backend
//! - [`memory`]: dashmap-backed backend for development and tests
//! - [`handlers`]: Postgres repositories, one per table
//! - [`models`]: store-level records
//! - [`errors`]: store error types

pub mod errors;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod store;

pub use memory::MemoryStore;
pub use store::{PgStore, Store, UserStore, WorkoutStore};
