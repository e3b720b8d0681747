//! Update Cart Line Handler

use std::collections::BTreeMap;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::ProductId;

use crate::{
    carts::{
        errors::into_status_error,
        handlers::{CartSummaryResponse, selection_from, summary_response},
    },
    extensions::*,
    observability::observe_cart_mutation,
};

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    /// New number of units
    pub quantity: u32,

    /// Options identifying the line
    #[serde(default)]
    pub option_ids: BTreeMap<i64, i64>,
}

/// Update Cart Line Handler
///
/// Replaces the quantity of a cart line. A line that is not in the cart is left alone.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Line Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity"),
        (status_code = StatusCode::FORBIDDEN, description = "CSRF token mismatch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartSummaryResponse>, StatusError> {
    let request = json.into_inner();
    let session = depot.cart_session_mut_or_500()?;

    let updated = session
        .update_item_quantity(
            ProductId::from_i64(product.into_inner()),
            request.quantity,
            selection_from(request.option_ids),
        )
        .await;

    observe_cart_mutation("update", updated.is_ok());

    updated.map_err(into_status_error)?;

    summary_response(session, "Quantity was updated").await
}
