//! Product Page Handler

use std::{collections::BTreeMap, sync::Arc};

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::keys::OptionSelection;

use crate::{
    extensions::*,
    pages::{Page, SharedProps, shared_props},
    products::{errors::into_status_error, resources::ProductResource},
    state::State,
};

/// Front-end component for the product page.
pub(crate) const COMPONENT: &str = "Product/Show";

/// Props for the product page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductShowProps {
    #[serde(flatten)]
    pub shared: SharedProps,

    pub product: ProductResource,

    /// The selection being shown, keyed by variation type id.
    #[serde(rename = "variationOptions")]
    pub variation_options: BTreeMap<i64, i64>,

    /// Unit price for the shown selection.
    #[serde(rename = "selectedPrice")]
    #[salvo(schema(value_type = f64))]
    pub selected_price: Decimal,

    /// Stock for the shown selection, `null` when the variation is untracked.
    #[serde(rename = "selectedQuantity")]
    pub selected_quantity: Option<u32>,
}

/// Product Page Handler
///
/// Returns a published product with its variation graph. `options` is a JSON
/// object of variation type id to option id; a selection the product does not
/// offer falls back to the first option of each type.
#[endpoint(
    tags("products"),
    summary = "Product Page",
    responses(
        (status_code = StatusCode::OK, description = "Product page"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed options query"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    options: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Page<ProductShowProps>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let requested = options
        .into_inner()
        .map(|json| OptionSelection::from_json(&json))
        .transpose()
        .or_400("Invalid options query")?;

    let product = state
        .app
        .products
        .get_product_by_slug(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    let selection = requested
        .filter(|selection| !selection.is_empty() && product.accepts_selection(selection))
        .map_or_else(
            || product.default_selection(),
            |selection| product.complete_selection(&selection),
        );

    let props = ProductShowProps {
        shared: shared_props(req, depot).await?,
        product: ProductResource::new(&product, &state.app.media),
        variation_options: selection
            .iter()
            .map(|(variation_type, option)| (variation_type.into_i64(), option.into_i64()))
            .collect(),
        selected_price: product.price_for_options(&selection),
        selected_quantity: product.quantity_for_options(&selection),
    };

    Ok(Json(Page::new(COMPONENT, req, props)))
}
