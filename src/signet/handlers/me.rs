use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::signet::{
    auth::{AuthContext, AuthError, AuthState, ErrorResponse},
    store::UserProfile,
};

#[utoipa::path(
    get,
    path= "/user/me",
    responses (
        (status = 200, description = "Authenticated user", body = UserProfile),
        (status = 401, description = "Missing, expired, or forged token", body = ErrorResponse),
        (status = 404, description = "Token subject no longer exists", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag= "user"
)]
#[instrument(skip_all)]
pub async fn me(
    context: Extension<AuthContext>,
    auth_state: Extension<Arc<AuthState>>,
) -> Response {
    let user_id = match context.require() {
        Ok(user_id) => user_id,
        Err(err) => return err.into_response(),
    };

    match auth_state.store().find_by_id(user_id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user.profile())).into_response(),
        Ok(None) => {
            debug!(%user_id, "token subject not found");
            (StatusCode::NOT_FOUND, Json(ErrorResponse::new("user not found"))).into_response()
        }
        Err(err) => AuthError::from(err).into_response(),
    }
}
