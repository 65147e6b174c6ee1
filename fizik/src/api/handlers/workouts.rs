use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::{
        json::AppJson,
        models::{
            users::CurrentUser,
            workouts::{WorkoutCreate, WorkoutResponse, WorkoutUpdate},
        },
    },
    errors::Result,
    workouts::{WorkoutService, parse_workout_id},
};

/// List the current user's workouts, newest first
#[utoipa::path(
    get,
    path = "/workouts",
    tag = "workouts",
    responses(
        (status = 200, description = "Workouts ordered by date, newest first", body = [WorkoutResponse]),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn list_workouts(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<WorkoutResponse>>> {
    let workouts = WorkoutService::new(&*state.store).list(current_user.id).await?;
    Ok(Json(workouts.into_iter().map(Into::into).collect()))
}

/// Get one workout
#[utoipa::path(
    get,
    path = "/workouts/{id}",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID (UUID)")),
    responses(
        (status = 200, description = "The workout", body = WorkoutResponse),
        (status = 400, description = "Malformed ID", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
        (status = 404, description = "No such workout for this user", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id, workout_id = %id))]
pub async fn get_workout(State(state): State<AppState>, current_user: CurrentUser, Path(id): Path<String>) -> Result<Json<WorkoutResponse>> {
    let id = parse_workout_id(&id)?;
    let workout = WorkoutService::new(&*state.store).get(current_user.id, id).await?;
    Ok(Json(workout.into()))
}

/// Log a workout
#[utoipa::path(
    post,
    path = "/workouts",
    tag = "workouts",
    request_body = WorkoutCreate,
    responses(
        (status = 201, description = "Workout created", body = WorkoutResponse),
        (status = 400, description = "Missing title or date, or nothing to log", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn create_workout(
    State(state): State<AppState>,
    current_user: CurrentUser,
    AppJson(request): AppJson<WorkoutCreate>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    let workout = WorkoutService::new(&*state.store).create(current_user.id, &request).await?;
    Ok((StatusCode::CREATED, Json(workout.into())))
}

/// Update a workout; omitted fields are left as they are
#[utoipa::path(
    put,
    path = "/workouts/{id}",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID (UUID)")),
    request_body = WorkoutUpdate,
    responses(
        (status = 200, description = "Workout updated", body = WorkoutResponse),
        (status = 400, description = "Malformed ID or invalid fields", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
        (status = 404, description = "No such workout for this user", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id, workout_id = %id))]
pub async fn update_workout(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    AppJson(request): AppJson<WorkoutUpdate>,
) -> Result<Json<WorkoutResponse>> {
    let id = parse_workout_id(&id)?;
    let workout = WorkoutService::new(&*state.store).update(current_user.id, id, &request).await?;
    Ok(Json(workout.into()))
}

/// Delete a workout
#[utoipa::path(
    delete,
    path = "/workouts/{id}",
    tag = "workouts",
    params(("id" = String, Path, description = "Workout ID (UUID)")),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 400, description = "Malformed ID", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
        (status = 404, description = "No such workout for this user", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id, workout_id = %id))]
pub async fn delete_workout(State(state): State<AppState>, current_user: CurrentUser, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_workout_id(&id)?;
    WorkoutService::new(&*state.store).delete(current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
