//! Restock Sweet Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    sweets::{errors::into_status_error, handlers::get::SweetResponse},
};

/// Restock Sweet Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestockSweetRequest {
    /// Units to add; defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Restock Sweet Handler
///
/// Increments stock. No upper bound.
#[endpoint(
    tags("sweets"),
    summary = "Restock Sweet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock incremented"),
        (status_code = StatusCode::NOT_FOUND, description = "Sweet not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Non-positive quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<RestockSweetRequest>,
    depot: &mut Depot,
) -> Result<Json<SweetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let quantity = json.into_inner().quantity.unwrap_or(1);

    let sweet = state
        .app
        .sweets
        .restock_sweet(uuid.into_inner().into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(sweet.into()))
}
