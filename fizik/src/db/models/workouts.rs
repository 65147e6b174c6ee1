//! Store models for workouts.

use crate::types::{UserId, WorkoutId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One set of an exercise. Both values are non-negative once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SetEntry {
    pub reps: f64,
    pub weight: f64,
}

impl SetEntry {
    pub fn is_empty(&self) -> bool {
        self.reps == 0.0 && self.weight == 0.0
    }
}

/// A named exercise with its sets, in the order they were performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<SetEntry>,
}

/// Store request for creating a workout; the fields are already validated.
#[derive(Debug, Clone)]
pub struct WorkoutCreateDBRequest {
    pub title: String,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
}

/// Store request for updating a workout. Each present field replaces the stored one.
#[derive(Debug, Clone, Default)]
pub struct WorkoutUpdateDBRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub exercises: Option<Vec<Exercise>>,
}

impl WorkoutUpdateDBRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.exercises.is_none()
    }
}

/// Store response for a workout
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDBResponse {
    pub id: WorkoutId,
    pub owner_id: UserId,
    pub title: String,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutDBResponse {
    /// Listing order: newest date first, then newest id first.
    pub fn listing_order(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
    }
}
