//! Checkout Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::users::records::UserId;

use crate::{
    carts::{errors::into_status_error, resources::CheckoutResource},
    extensions::*,
    observability::observe_cart_mutation,
};

/// Checkout Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Only check out lines sold by this vendor
    #[serde(default)]
    pub vendor_id: Option<i64>,
}

/// Checkout Handler
///
/// Returns the vendor-grouped cart and totals to hand to the payment provider.
#[endpoint(
    tags("cart"),
    summary = "Start Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Checkout summary"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Nothing to check out"),
        (status_code = StatusCode::FORBIDDEN, description = "CSRF token mismatch"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResource>, StatusError> {
    let vendor = json.into_inner().vendor_id.map(UserId::from_i64);
    let session = depot.cart_session_or_500()?;

    let checkout = session.checkout(vendor).await;

    observe_cart_mutation("checkout", checkout.is_ok());

    let checkout = checkout.map_err(into_status_error)?;

    info!(
        groups = checkout.groups.len(),
        total_quantity = checkout.total_quantity,
        total_price = %checkout.total_price,
        "checkout initiated"
    );

    Ok(Json((&checkout).into()))
}
