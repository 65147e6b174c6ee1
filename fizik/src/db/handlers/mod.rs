//! PostgreSQL repositories.

pub mod repository;
pub mod users;
pub mod workouts;

pub use repository::Repository;
pub use users::Users;
pub use workouts::Workouts;
