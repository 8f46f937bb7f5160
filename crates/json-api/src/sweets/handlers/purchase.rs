//! Purchase Sweet Handler

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

/// Purchase Sweet Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseSweetRequest {
    /// Units to purchase; defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Purchase Sweet Handler
///
/// Decrements stock, bounded at zero.
#[endpoint(
    tags("sweets"),
    summary = "Purchase Sweet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock decremented"),
        (status_code = StatusCode::NOT_FOUND, description = "Sweet not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Non-positive quantity or insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<PurchaseSweetRequest>,
    depot: &mut Depot,
) -> Result<Json<SweetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let quantity = json.into_inner().quantity.unwrap_or(1);

    let sweet = state
        .app
        .sweets
        .purchase_sweet(uuid.into_inner().into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(sweet.into()))
}
