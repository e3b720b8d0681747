//! Add To Cart Handler

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

/// Add To Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    /// Units to add, 1 when omitted
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Chosen option per variation type id; the first option of each type when omitted
    #[serde(default)]
    pub option_ids: Option<BTreeMap<i64, i64>>,
}

/// Add To Cart Handler
///
/// Adds the product to the caller's cart, merging with an identical line.
#[endpoint(
    tags("cart"),
    summary = "Add Product To Cart",
    responses(
        (status_code = StatusCode::OK, description = "Product added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid quantity or options"),
        (status_code = StatusCode::FORBIDDEN, description = "CSRF token mismatch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartSummaryResponse>, StatusError> {
    let request = json.into_inner();
    let session = depot.cart_session_mut_or_500()?;

    let added = session
        .add_item(
            ProductId::from_i64(product.into_inner()),
            request.quantity.unwrap_or(1),
            request.option_ids.map(selection_from),
        )
        .await;

    observe_cart_mutation("add", added.is_ok());

    added.map_err(into_status_error)?;

    summary_response(session, "Product added to cart").await
}
