use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::service::AuthService,
    errors::{Error, Result},
};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, instrument, trace};

/// Pull the token out of an `Authorization: Bearer <token>` header.
/// Returns:
/// - None: No Authorization header, or a non-Bearer scheme
/// - Some(Ok(token)): Bearer token present
/// - Some(Err(error)): Header present but not valid UTF-8
fn bearer_token(parts: &Parts) -> Option<Result<&str>> {
    let header = parts.headers.get(AUTHORIZATION)?;

    let value = match header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }));
        }
    };

    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(Ok(token.trim()))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = match bearer_token(parts) {
            Some(Ok(token)) => token,
            Some(Err(e)) => return Err(e),
            None => {
                trace!("No bearer token in request");
                return Err(Error::Unauthenticated {
                    message: Some("Missing bearer token".to_string()),
                });
            }
        };

        let user = AuthService::new(&*state.store, &state.config).verify_token(token)?;
        debug!("Authenticated user: {}", user.id);
        Ok(user)
    }
}
