//! Sweet Index Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sweetshop_app::domain::sweets::data::SweetFilter;

use crate::{extensions::*, state::State, sweets::handlers::get::SweetResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SweetsResponse {
    /// The list of sweets, newest first
    pub sweets: Vec<SweetResponse>,
}

/// Sweet Index Handler
///
/// Returns sweets matching the optional filters.
#[endpoint(
    tags("sweets"),
    summary = "List Sweets",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    min_price: QueryParam<Decimal, false>,
    max_price: QueryParam<Decimal, false>,
    depot: &mut Depot,
) -> Result<Json<SweetsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let filter = SweetFilter {
        category: category.into_inner(),
        search: search.into_inner(),
        min_price: min_price.into_inner(),
        max_price: max_price.into_inner(),
    };

    let sweets = state
        .app
        .sweets
        .list_sweets(filter)
        .await
        .or_500("failed to fetch sweets")?;

    Ok(Json(SweetsResponse {
        sweets: sweets.into_iter().map(Into::into).collect(),
    }))
}
