//! Create Sweet Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sweetshop_app::domain::sweets::{data::NewSweet, records::SweetUuid};

use crate::{
    extensions::*,
    state::State,
    sweets::{errors::into_status_error, handlers::get::SweetResponse},
};

/// Create Sweet Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSweetRequest {
    pub name: String,
    pub category: String,
    pub price: Decimal,

    /// Initial stock; defaults to zero.
    #[serde(default)]
    pub quantity: u64,
}

impl CreateSweetRequest {
    fn into_new_sweet(self) -> NewSweet {
        NewSweet {
            uuid: SweetUuid::new(),
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Create Sweet Handler
#[endpoint(
    tags("sweets"),
    summary = "Create Sweet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Sweet created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSweetRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SweetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let sweet = state
        .app
        .sweets
        .create_sweet(json.into_inner().into_new_sweet())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/sweets/{}", sweet.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(sweet.into()))
}
