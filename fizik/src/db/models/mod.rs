//! Store-level records, independent of the HTTP representation.

pub mod users;
pub mod workouts;
