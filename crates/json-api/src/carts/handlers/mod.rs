//! Cart Handlers

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::{
    domain::carts::{CartSession, keys::OptionSelection},
    ids::TypedId,
};

use crate::extensions::*;

pub(crate) mod checkout;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

/// Cart totals after a change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummaryResponse {
    pub message: String,

    #[serde(rename = "totalQuantity")]
    pub total_quantity: u64,

    #[serde(rename = "totalPrice")]
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,
}

/// Typed selection from the wire map of variation type id to option id.
pub(super) fn selection_from(option_ids: BTreeMap<i64, i64>) -> OptionSelection {
    option_ids
        .into_iter()
        .map(|(variation_type, option)| (TypedId::from_i64(variation_type), TypedId::from_i64(option)))
        .collect()
}

/// JSON reply carrying `message` and the cart's fresh totals.
pub(super) async fn summary_response(
    session: &CartSession,
    message: &str,
) -> Result<Json<CartSummaryResponse>, StatusError> {
    Ok(Json(CartSummaryResponse {
        message: message.to_string(),
        total_quantity: session
            .total_quantity()
            .await
            .or_500("failed to read cart after update")?,
        total_price: session
            .total_price()
            .await
            .or_500("failed to read cart after update")?,
    }))
}
