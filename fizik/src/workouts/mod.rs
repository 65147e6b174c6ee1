//! Workout CRUD scoped to the authenticated user.
//!
//! [`WorkoutService`] validates and normalizes input (see [`normalize`]) before
//! anything reaches the store, so a rejected update leaves the stored workout
//! untouched. A workout that exists but belongs to someone else is reported as
//! not found.

pub mod normalize;

use tracing::instrument;

use crate::api::models::workouts::{WorkoutCreate, WorkoutUpdate};
use crate::db::models::workouts::{WorkoutCreateDBRequest, WorkoutDBResponse, WorkoutUpdateDBRequest};
use crate::db::store::WorkoutStore;
use crate::errors::{Error, Result};
use crate::types::{UserId, WorkoutId, abbrev_uuid};

use normalize::{MISSING_TITLE_OR_DATE, normalize_exercises, parse_date, parse_title, validate_exercises};

/// Parse a path id. Malformed ids are a client error, not a lookup miss.
pub fn parse_workout_id(raw: &str) -> Result<WorkoutId> {
    raw.parse().map_err(|_| Error::bad_request("invalid id"))
}

fn not_found(id: WorkoutId) -> Error {
    Error::NotFound {
        resource: "Workout".to_string(),
        id: id.to_string(),
    }
}

pub struct WorkoutService<'a, S: WorkoutStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: WorkoutStore + ?Sized> WorkoutService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn list(&self, user_id: UserId) -> Result<Vec<WorkoutDBResponse>> {
        Ok(self.store.list_workouts(user_id).await?)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), workout_id = %abbrev_uuid(&id)), err)]
    pub async fn get(&self, user_id: UserId, id: WorkoutId) -> Result<WorkoutDBResponse> {
        self.store.get_workout(user_id, id).await?.ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn create(&self, user_id: UserId, request: &WorkoutCreate) -> Result<WorkoutDBResponse> {
        let (Some(title), Some(date)) = (request.title.as_deref(), request.date.as_deref()) else {
            return Err(Error::bad_request(MISSING_TITLE_OR_DATE));
        };
        let title = parse_title(title)?;
        let date = parse_date(date)?;
        let exercises = normalize_exercises(&request.exercises);
        validate_exercises(&exercises)?;

        let workout = self
            .store
            .create_workout(user_id, &WorkoutCreateDBRequest { title, date, exercises })
            .await?;
        tracing::debug!(workout_id = %abbrev_uuid(&workout.id), "created workout");
        Ok(workout)
    }

    /// Every present field fully replaces the stored one. All fields are
    /// validated before the store is touched.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&user_id), workout_id = %abbrev_uuid(&id)), err)]
    pub async fn update(&self, user_id: UserId, id: WorkoutId, request: &WorkoutUpdate) -> Result<WorkoutDBResponse> {
        let patch = WorkoutUpdateDBRequest {
            title: request.title.as_deref().map(parse_title).transpose()?,
            date: request.date.as_deref().map(parse_date).transpose()?,
            exercises: request
                .exercises
                .as_deref()
                .map(|input| {
                    let exercises = normalize_exercises(input);
                    validate_exercises(&exercises).map(|_| exercises)
                })
                .transpose()?,
        };

        if patch.is_empty() {
            return self.get(user_id, id).await;
        }

        self.store.update_workout(user_id, id, &patch).await?.ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), workout_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&self, user_id: UserId, id: WorkoutId) -> Result<()> {
        if self.store.delete_workout(user_id, id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}
