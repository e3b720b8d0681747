//! Remove Cart Line Handler

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

/// Remove Cart Line Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartLineRequest {
    /// Options identifying the line
    #[serde(default)]
    pub option_ids: BTreeMap<i64, i64>,
}

/// Remove Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Line",
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::FORBIDDEN, description = "CSRF token mismatch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<RemoveCartLineRequest>,
    depot: &mut Depot,
) -> Result<Json<CartSummaryResponse>, StatusError> {
    let request = json.into_inner();
    let session = depot.cart_session_mut_or_500()?;

    let removed = session
        .remove_item(
            ProductId::from_i64(product.into_inner()),
            selection_from(request.option_ids),
        )
        .await;

    observe_cart_mutation("remove", removed.is_ok());

    removed.map_err(into_status_error)?;

    summary_response(session, "Product was removed from cart").await
}
