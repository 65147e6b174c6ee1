//! OpenAPI documentation for the `/api` surface.
//!
//! [`ApiDoc`] collects every handler's `#[utoipa::path]` and is rendered by
//! Scalar at `/docs`.

use serde::{Deserialize, Serialize};
use utoipa::{
    Modify, OpenApi, ToSchema,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{api, history};

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of what went wrong
    pub error: String,
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token returned by `/auth/register` or `/auth/login`:\n\n\
                            ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api", description = "Workout log API")
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::health::health,
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::change_password,
        api::handlers::auth::me,
        api::handlers::workouts::list_workouts,
        api::handlers::workouts::get_workout,
        api::handlers::workouts::create_workout,
        api::handlers::workouts::update_workout,
        api::handlers::workouts::delete_workout,
        api::handlers::history::get_history,
        api::handlers::exercises::suggest_exercises,
    ),
    components(
        schemas(
            ErrorResponse,
            api::handlers::health::HealthResponse,
            api::models::auth::RegisterRequest,
            api::models::auth::LoginRequest,
            api::models::auth::AuthResponse,
            api::models::auth::ChangePasswordRequest,
            api::models::auth::MessageResponse,
            api::models::users::UserResponse,
            api::models::workouts::SetInput,
            api::models::workouts::ExerciseInput,
            api::models::workouts::WorkoutCreate,
            api::models::workouts::WorkoutUpdate,
            api::models::workouts::WorkoutResponse,
            api::models::history::HistoryResponse,
            crate::db::models::workouts::Exercise,
            crate::db::models::workouts::SetEntry,
            history::HistoryPoint,
        )
    ),
    tags(
        (name = "health", description = "Liveness."),
        (name = "authentication", description = "Create an account, log in, and manage your password.

Successful registration and login return a session token. Send it on every other request as `Authorization: Bearer <token>`. Logging out is a client-side operation: discard the token."),
        (name = "workouts", description = "Log workouts made of exercises and sets.

Workouts are private to their owner. Requests for another user's workout answer `404` exactly as if it did not exist."),
        (name = "history", description = "Weight-over-time series, personal best and recent sets for one exercise."),
        (name = "exercises", description = "Autocomplete for exercise names, preferring names you have already logged."),
    ),
    info(
        title = "fizik",
        description = "Personal strength-training log.",
    )
)]
pub struct ApiDoc;
