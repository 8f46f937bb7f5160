//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, handlers::register::UserResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Raw bearer token; shown exactly once.
    pub access_token: String,

    /// Always "Bearer".
    pub token_type: String,

    /// Token expiry instant.
    pub expires_at: String,

    pub user: UserResponse,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let login = state
        .app
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        access_token: login.token,
        token_type: "Bearer".to_string(),
        expires_at: login.expires_at.to_string(),
        user: login.user.into(),
    }))
}
