use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::{
        json::AppJson,
        models::{
            auth::{AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, RegisterRequest},
            users::{CurrentUser, UserResponse},
        },
    },
    auth::service::{AuthService, Session},
    db::UserStore,
    errors::{Error, Result},
};

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "authentication",
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Missing username or password, or registration disabled", body = crate::openapi::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::openapi::ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, AppJson(request): AppJson<RegisterRequest>) -> Result<(StatusCode, Json<AuthResponse>)> {
    let session = AuthService::new(&*state.store, &state.config)
        .register(&request.username, &request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing username or password", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Invalid username or password", body = crate::openapi::ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, AppJson(request): AppJson<LoginRequest>) -> Result<Json<AuthResponse>> {
    let session = AuthService::new(&*state.store, &state.config)
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(session.into()))
}

/// Change the current user's password
#[utoipa::path(
    post,
    path = "/auth/password-change",
    request_body = ChangePasswordRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "New password does not meet requirements", body = crate::openapi::ErrorResponse),
        (status = 401, description = "Not authenticated or current password wrong", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn change_password(
    State(state): State<AppState>,
    current_user: CurrentUser,
    AppJson(request): AppJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    AuthService::new(&*state.store, &state.config)
        .change_password(current_user.id, &request.current_password, &request.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password changed".to_string(),
    }))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/me",
    tag = "authentication",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = crate::openapi::ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = %current_user.id))]
pub async fn me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    let user = state
        .store
        .get_user_by_id(current_user.id)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("User no longer exists".to_string()),
        })?;
    Ok(Json(user.into()))
}
