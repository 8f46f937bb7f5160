//! Update Sweet Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sweetshop_app::domain::sweets::data::SweetUpdate;

use crate::{
    extensions::*,
    state::State,
    sweets::{errors::into_status_error, handlers::get::SweetResponse},
};

/// Update Sweet Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSweetRequest {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: u64,
}

impl From<UpdateSweetRequest> for SweetUpdate {
    fn from(request: UpdateSweetRequest) -> Self {
        SweetUpdate {
            name: request.name,
            category: request.category,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Update Sweet Handler
#[endpoint(
    tags("sweets"),
    summary = "Update Sweet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sweet updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Sweet not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateSweetRequest>,
    depot: &mut Depot,
) -> Result<Json<SweetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let sweet = state
        .app
        .sweets
        .update_sweet(uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(sweet.into()))
}
