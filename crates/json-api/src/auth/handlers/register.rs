//! Register Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sweetshop_app::auth::{NewUser, UserRecord, UserRole};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,

    /// Account role; defaults to "customer".
    #[serde(default)]
    pub role: Option<String>,
}

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    pub username: String,

    pub email: String,

    /// "customer" or "admin"
    pub role: String,

    /// The date and time the account was created
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Username already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let role = match request.role.as_deref() {
        None => UserRole::Customer,
        Some(role) => UserRole::from_str(role).or_400("Unknown role")?,
    };

    let user = state
        .app
        .auth
        .register(NewUser {
            username: request.username,
            email: request.email,
            password: request.password,
            role,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
