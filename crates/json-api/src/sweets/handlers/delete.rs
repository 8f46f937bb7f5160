//! Delete Sweet Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, sweets::errors::into_status_error};

/// Delete Sweet Handler
#[endpoint(
    tags("sweets"),
    summary = "Delete Sweet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sweet deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Sweet not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    state
        .app
        .sweets
        .delete_sweet(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
