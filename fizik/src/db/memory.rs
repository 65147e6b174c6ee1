//! In-process store for development and tests.
//!
//! Users live in a [`DashMap`] keyed by id with a second map reserving usernames;
//! workouts are bucketed per owner. Each mutation touches a single map entry, so
//! it is atomic under that entry's shard lock. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use std::collections::BTreeMap;
use tracing::instrument;

use crate::db::{
    errors::{DbError, Result},
    models::{
        users::{UserCreateDBRequest, UserDBResponse},
        workouts::{WorkoutCreateDBRequest, WorkoutDBResponse, WorkoutUpdateDBRequest},
    },
    store::{UserStore, WorkoutStore},
};
use crate::types::{UserId, WorkoutId, abbrev_uuid, new_user_id, new_workout_id};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserId, UserDBResponse>,
    usernames: DashMap<String, UserId>,
    workouts: DashMap<UserId, BTreeMap<WorkoutId, WorkoutDBResponse>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    #[instrument(skip(self, request), fields(username = %request.username), err)]
    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        // Reserving the name first makes concurrent registrations of one username race safely
        let id = match self.usernames.entry(request.username.clone()) {
            Entry::Occupied(_) => return Err(DbError::duplicate_username(&request.username)),
            Entry::Vacant(slot) => *slot.insert(new_user_id()),
        };

        let now = Utc::now();
        let user = UserDBResponse {
            id,
            username: request.username.clone(),
            password_hash: request.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserDBResponse>> {
        let Some(id) = self.usernames.get(username).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<UserDBResponse>> {
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    #[instrument(skip(self, password_hash), fields(user_id = %abbrev_uuid(&id)), err)]
    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<UserDBResponse> {
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn list_workouts(&self, owner: UserId) -> Result<Vec<WorkoutDBResponse>> {
        let mut workouts: Vec<_> = self
            .workouts
            .get(&owner)
            .map(|bucket| bucket.values().cloned().collect())
            .unwrap_or_default();
        workouts.sort_by(WorkoutDBResponse::listing_order);
        Ok(workouts)
    }

    async fn get_workout(&self, owner: UserId, id: WorkoutId) -> Result<Option<WorkoutDBResponse>> {
        Ok(self.workouts.get(&owner).and_then(|bucket| bucket.get(&id).cloned()))
    }

    #[instrument(skip(self, request), fields(owner = %abbrev_uuid(&owner), exercises = request.exercises.len()), err)]
    async fn create_workout(&self, owner: UserId, request: &WorkoutCreateDBRequest) -> Result<WorkoutDBResponse> {
        if !self.users.contains_key(&owner) {
            return Err(DbError::ForeignKeyViolation {
                constraint: Some("workouts_owner_id_fkey".to_string()),
                table: Some("workouts".to_string()),
                message: format!("owner {owner} does not exist"),
            });
        }

        let now = Utc::now();
        let workout = WorkoutDBResponse {
            id: new_workout_id(),
            owner_id: owner,
            title: request.title.clone(),
            date: request.date,
            exercises: request.exercises.clone(),
            created_at: now,
            updated_at: now,
        };
        self.workouts.entry(owner).or_default().insert(workout.id, workout.clone());
        Ok(workout)
    }

    #[instrument(skip(self, request), fields(owner = %abbrev_uuid(&owner), workout_id = %abbrev_uuid(&id)), err)]
    async fn update_workout(&self, owner: UserId, id: WorkoutId, request: &WorkoutUpdateDBRequest) -> Result<Option<WorkoutDBResponse>> {
        let Some(mut bucket) = self.workouts.get_mut(&owner) else {
            return Ok(None);
        };
        let Some(workout) = bucket.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &request.title {
            workout.title = title.clone();
        }
        if let Some(date) = request.date {
            workout.date = date;
        }
        if let Some(exercises) = &request.exercises {
            workout.exercises = exercises.clone();
        }
        workout.updated_at = Utc::now();

        Ok(Some(workout.clone()))
    }

    #[instrument(skip(self), fields(owner = %abbrev_uuid(&owner), workout_id = %abbrev_uuid(&id)), err)]
    async fn delete_workout(&self, owner: UserId, id: WorkoutId) -> Result<bool> {
        Ok(self
            .workouts
            .get_mut(&owner)
            .is_some_and(|mut bucket| bucket.remove(&id).is_some()))
    }
}
