//! Wire types for workouts.
//!
//! Inputs are deliberately loose: set values may arrive as numbers, numeric
//! strings, or garbage, and exercise names may be missing or not strings. The
//! [`crate::workouts::normalize`] module turns them into store records.
//!
//! The `exercises` and `sets` lists never fail to deserialize. A list that is
//! not an array reads as empty, and entries that are not objects are skipped.

use crate::db::models::workouts::{Exercise, WorkoutDBResponse};
use crate::types::WorkoutId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

fn lenient_items<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(deserializer).map(lenient_items)
}

/// Present (even as `null`) means "replace", so this always yields `Some`.
fn lenient_optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    lenient_list(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SetInput {
    #[serde(default)]
    #[schema(value_type = f64)]
    pub reps: Value,
    #[serde(default)]
    #[schema(value_type = f64)]
    pub weight: Value,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ExerciseInput {
    #[serde(default)]
    #[schema(value_type = String)]
    pub name: Value,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sets: Vec<SetInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WorkoutCreate {
    pub title: Option<String>,
    /// `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC date is used
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub exercises: Vec<ExerciseInput>,
}

/// Partial update; every present field replaces the stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WorkoutUpdate {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_list")]
    pub exercises: Option<Vec<ExerciseInput>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct WorkoutResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: WorkoutId,
    pub title: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkoutDBResponse> for WorkoutResponse {
    fn from(db: WorkoutDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            date: db.date,
            exercises: db.exercises,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
