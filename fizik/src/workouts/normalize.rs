//! Turning loose workout input into store records.
//!
//! Set values never fail validation: anything that is not a non-negative finite
//! number becomes 0. Exercises without a usable name, or without sets, are
//! dropped. Only the workout-level checks in [`validate_exercises`] reject input.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::api::models::workouts::{ExerciseInput, SetInput};
use crate::db::models::workouts::{Exercise, SetEntry};
use crate::errors::{Error, Result};

pub const MISSING_TITLE_OR_DATE: &str = "title and date are required";
pub const NO_EXERCISES: &str = "add at least one exercise";
pub const NO_NONZERO_SETS: &str = "add at least one set with reps or weight";

/// Coerce a JSON value to a non-negative finite number, defaulting to 0.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 { n } else { 0.0 }
}

fn normalize_set(set: &SetInput) -> SetEntry {
    SetEntry {
        reps: coerce_number(&set.reps),
        weight: coerce_number(&set.weight),
    }
}

fn normalize_exercise(exercise: &ExerciseInput) -> Option<Exercise> {
    let name = exercise.name.as_str()?.trim();
    if name.is_empty() || exercise.sets.is_empty() {
        return None;
    }
    Some(Exercise {
        name: name.to_string(),
        sets: exercise.sets.iter().map(normalize_set).collect(),
    })
}

/// Normalize exercises, preserving order of the survivors and of their sets.
pub fn normalize_exercises(input: &[ExerciseInput]) -> Vec<Exercise> {
    input.iter().filter_map(normalize_exercise).collect()
}

/// Reject a workout with nothing in it.
pub fn validate_exercises(exercises: &[Exercise]) -> Result<()> {
    if exercises.is_empty() {
        return Err(Error::bad_request(NO_EXERCISES));
    }
    if exercises.iter().flat_map(|e| &e.sets).all(SetEntry::is_empty) {
        return Err(Error::bad_request(NO_NONZERO_SETS));
    }
    Ok(())
}

/// Trimmed, non-empty title.
pub fn parse_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::bad_request(MISSING_TITLE_OR_DATE));
    }
    Ok(title.to_string())
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC calendar date is kept.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    let date = date.trim();
    if date.is_empty() {
        return Err(Error::bad_request(MISSING_TITLE_OR_DATE));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(date).map(|dt| dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| Error::bad_request(format!("invalid date '{date}', expected YYYY-MM-DD")))
}
