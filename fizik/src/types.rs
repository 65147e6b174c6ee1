//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases:
//!
//! - [`UserId`]: user account identifier (random, v4)
//! - [`WorkoutId`]: workout identifier (time ordered, v7)
//!
//! Workout ids being time ordered is what makes "newest first" a stable
//! tie-break when two workouts share a date.
//!
//! # Utility Functions
//!
//! - [`abbrev_uuid`]: Abbreviate UUIDs to first 8 chars for logging
//! - [`new_workout_id`]: Mint a time-ordered workout id

use uuid::Uuid;

pub type UserId = Uuid;
pub type WorkoutId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

pub fn new_user_id() -> UserId {
    Uuid::new_v4()
}

/// Workout ids sort in creation order.
pub fn new_workout_id() -> WorkoutId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }

    #[test]
    fn test_workout_ids_increase() {
        let first = new_workout_id();
        let second = new_workout_id();
        assert!(second > first);
    }
}
