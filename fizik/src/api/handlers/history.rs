use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::{
        history::{HistoryQuery, HistoryResponse},
        users::CurrentUser,
    },
    errors::Result,
    history::{self, RECENT_SETS},
    workouts::WorkoutService,
};

/// Weight-over-time history for one exercise
///
/// Without `exercise`, the most frequently logged exercise is used.
#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Series, personal best and recent sets", body = HistoryResponse),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn get_history(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let workouts = WorkoutService::new(&*state.store).list(current_user.id).await?;

    let exercise = query
        .exercise
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| history::default_exercise(&workouts));

    let points = exercise.as_deref().map(|name| history::series(&workouts, name)).unwrap_or_default();

    Ok(Json(HistoryResponse {
        exercises: history::exercise_names(&workouts),
        personal_best: history::personal_best(&points),
        recent_sets: history::recent_sets(&points, RECENT_SETS),
        exercise,
        points,
    }))
}
