//! Get Sweet Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sweetshop_app::domain::sweets::records::SweetRecord;

use crate::{extensions::*, state::State, sweets::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SweetResponse {
    /// The unique identifier of the sweet
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Descriptive category
    pub category: String,

    /// Unit price
    pub price: Decimal,

    /// Quantity on hand
    pub quantity: u64,

    /// The date and time the sweet was created
    pub created_at: String,

    /// The date and time the sweet was last updated
    pub updated_at: String,
}

impl From<SweetRecord> for SweetResponse {
    fn from(sweet: SweetRecord) -> Self {
        SweetResponse {
            uuid: sweet.uuid.into(),
            name: sweet.name,
            category: sweet.category,
            price: sweet.price,
            quantity: sweet.quantity,
            created_at: sweet.created_at.to_string(),
            updated_at: sweet.updated_at.to_string(),
        }
    }
}

/// Get Sweet Handler
///
/// Returns a sweet.
#[endpoint(
    tags("sweets"),
    summary = "Get Sweet",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SweetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let sweet = state
        .app
        .sweets
        .get_sweet(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(sweet.into()))
}
