//! Database repository for workouts.
//!
//! A [`Workouts`] repository is bound to one owner; every statement it issues
//! carries `owner_id = $owner`, so a workout belonging to someone else behaves
//! exactly like one that does not exist.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::workouts::{Exercise, WorkoutCreateDBRequest, WorkoutDBResponse, WorkoutUpdateDBRequest},
};
use crate::types::{UserId, WorkoutId, abbrev_uuid, new_workout_id};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgConnection, types::Json};
use tracing::instrument;

const WORKOUT_COLUMNS: &str = "id, owner_id, title, date, exercises, created_at, updated_at";

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Workout {
    pub id: WorkoutId,
    pub owner_id: UserId,
    pub title: String,
    pub date: NaiveDate,
    pub exercises: Json<Vec<Exercise>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Workout> for WorkoutDBResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            owner_id: workout.owner_id,
            title: workout.title,
            date: workout.date,
            exercises: workout.exercises.0,
            created_at: workout.created_at,
            updated_at: workout.updated_at,
        }
    }
}

pub struct Workouts<'c> {
    db: &'c mut PgConnection,
    owner: UserId,
}

impl<'c> Workouts<'c> {
    pub fn new(db: &'c mut PgConnection, owner: UserId) -> Self {
        Self { db, owner }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Workouts<'c> {
    type CreateRequest = WorkoutCreateDBRequest;
    type UpdateRequest = WorkoutUpdateDBRequest;
    type Response = WorkoutDBResponse;
    type Id = WorkoutId;

    #[instrument(skip(self, request), fields(owner = %abbrev_uuid(&self.owner), exercises = request.exercises.len()), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let workout = sqlx::query_as::<_, Workout>(&format!(
            "INSERT INTO workouts (id, owner_id, title, date, exercises) VALUES ($1, $2, $3, $4, $5) RETURNING {WORKOUT_COLUMNS}"
        ))
        .bind(new_workout_id())
        .bind(self.owner)
        .bind(&request.title)
        .bind(request.date)
        .bind(Json(&request.exercises))
        .fetch_one(&mut *self.db)
        .await?;

        Ok(workout.into())
    }

    #[instrument(skip(self), fields(owner = %abbrev_uuid(&self.owner), workout_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let workout = sqlx::query_as::<_, Workout>(&format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1 AND owner_id = $2"))
            .bind(id)
            .bind(self.owner)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(workout.map(Into::into))
    }

    #[instrument(skip(self), fields(owner = %abbrev_uuid(&self.owner)), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let workouts = sqlx::query_as::<_, Workout>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE owner_id = $1 ORDER BY date DESC, id DESC"
        ))
        .bind(self.owner)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(workouts.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self), fields(owner = %abbrev_uuid(&self.owner), workout_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(self.owner)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(owner = %abbrev_uuid(&self.owner), workout_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let workout = sqlx::query_as::<_, Workout>(&format!(
            r#"
            UPDATE workouts SET
                title = COALESCE($3, title),
                date = COALESCE($4, date),
                exercises = COALESCE($5, exercises),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {WORKOUT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(self.owner)
        .bind(request.title.as_deref())
        .bind(request.date)
        .bind(request.exercises.as_ref().map(Json))
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(workout.into())
    }
}
