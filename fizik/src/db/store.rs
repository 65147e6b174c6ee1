//! Store traits the services are written against, and the PostgreSQL backend.
//!
//! Every workout operation takes the owning user; there is no way to address a
//! workout without one.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::{
    errors::Result,
    handlers::{Repository, Users, Workouts},
    models::{
        users::{UserCreateDBRequest, UserDBResponse},
        workouts::{WorkoutCreateDBRequest, WorkoutDBResponse, WorkoutUpdateDBRequest},
    },
};
use crate::types::{UserId, WorkoutId};

/// Credential storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with a unique violation if the username is taken.
    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserDBResponse>>;

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<UserDBResponse>>;

    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<UserDBResponse>;
}

/// Per-user workout storage.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// All of the owner's workouts, newest date first, then newest id first.
    async fn list_workouts(&self, owner: UserId) -> Result<Vec<WorkoutDBResponse>>;

    async fn get_workout(&self, owner: UserId, id: WorkoutId) -> Result<Option<WorkoutDBResponse>>;

    async fn create_workout(&self, owner: UserId, request: &WorkoutCreateDBRequest) -> Result<WorkoutDBResponse>;

    /// `None` if the owner has no workout with this id.
    async fn update_workout(&self, owner: UserId, id: WorkoutId, request: &WorkoutUpdateDBRequest) -> Result<Option<WorkoutDBResponse>>;

    /// `false` if the owner has no workout with this id.
    async fn delete_workout(&self, owner: UserId, id: WorkoutId) -> Result<bool>;
}

/// Everything the application needs from a backend.
pub trait Store: UserStore + WorkoutStore {}

impl<T: UserStore + WorkoutStore> Store for T {}

/// PostgreSQL-backed store.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, request: &UserCreateDBRequest) -> Result<UserDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).create(request).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).get_user_by_username(username).await
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<UserDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).get_by_id(id).await
    }

    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<UserDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Users::new(&mut conn).set_password_hash(id, password_hash).await
    }
}

#[async_trait]
impl WorkoutStore for PgStore {
    async fn list_workouts(&self, owner: UserId) -> Result<Vec<WorkoutDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Workouts::new(&mut conn, owner).list().await
    }

    async fn get_workout(&self, owner: UserId, id: WorkoutId) -> Result<Option<WorkoutDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        Workouts::new(&mut conn, owner).get_by_id(id).await
    }

    async fn create_workout(&self, owner: UserId, request: &WorkoutCreateDBRequest) -> Result<WorkoutDBResponse> {
        let mut conn = self.pool.acquire().await?;
        Workouts::new(&mut conn, owner).create(request).await
    }

    async fn update_workout(&self, owner: UserId, id: WorkoutId, request: &WorkoutUpdateDBRequest) -> Result<Option<WorkoutDBResponse>> {
        let mut conn = self.pool.acquire().await?;
        match Workouts::new(&mut conn, owner).update(id, request).await {
            Ok(workout) => Ok(Some(workout)),
            Err(crate::db::errors::DbError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_workout(&self, owner: UserId, id: WorkoutId) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Workouts::new(&mut conn, owner).delete(id).await
    }
}
