use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

use crate::signet::auth::{self, AuthPayload, AuthState, ErrorResponse};

#[derive(ToSchema, Serialize, Deserialize)]
pub struct UserRegister {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegister")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .finish()
    }
}

#[utoipa::path(
    post,
    path= "/user/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", body = AuthPayload, content_type = "application/json"),
        (status = 400, description = "Invalid email, password, or name", body = ErrorResponse),
        (status = 409, description = "User with the specified email already exists", body = ErrorResponse),
    ),
    tag= "register"
)]
// axum handler for register
#[instrument(skip_all)]
pub async fn register(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<UserRegister>>,
) -> Response {
    let Some(Json(user)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("missing payload")),
        )
            .into_response();
    };

    match auth::register(&auth_state, &user.email, &user.password, &user.name).await {
        Ok(payload) => (StatusCode::CREATED, Json(payload)).into_response(),
        Err(err) => err.into_response(),
    }
}
