use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    api::models::{exercises::ExerciseSearchQuery, users::CurrentUser},
    errors::Result,
    exercise_library::{self, DEFAULT_SUGGESTIONS, MAX_SUGGESTIONS},
    history,
    workouts::WorkoutService,
};

/// Suggest exercise names for autocomplete
///
/// Matches the user's own exercise names first, then a built-in list of common lifts.
#[utoipa::path(
    get,
    path = "/exercises",
    tag = "exercises",
    params(ExerciseSearchQuery),
    responses(
        (status = 200, description = "Matching exercise names", body = [String]),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn suggest_exercises(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ExerciseSearchQuery>,
) -> Result<Json<Vec<String>>> {
    let workouts = WorkoutService::new(&*state.store).list(current_user.id).await?;
    let own = history::exercise_names(&workouts);
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTIONS).min(MAX_SUGGESTIONS);

    Ok(Json(exercise_library::suggest(
        query.q.as_deref().unwrap_or_default(),
        own.iter().map(String::as_str),
        limit,
    )))
}
