//! Home Page Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::data::Pagination;

use crate::{
    extensions::*,
    pages::{Page, SharedProps, shared_props},
    products::{errors::into_status_error, resources::ProductListResource},
    state::State,
};

/// Front-end component for the home page.
pub(crate) const COMPONENT: &str = "Home";

/// Props for the home page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HomeProps {
    #[serde(flatten)]
    pub shared: SharedProps,

    /// One page of published products, newest first.
    pub products: ProductListResource,
}

/// Home Page Handler
///
/// Returns a page of published products.
#[endpoint(tags("products"), summary = "Home Page")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Page<HomeProps>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let pagination = Pagination::new(
        page.into_inner().unwrap_or(1),
        per_page.into_inner().unwrap_or(state.site.per_page),
    );

    let listing = state
        .app
        .products
        .list_products(pagination)
        .await
        .map_err(into_status_error)?;

    let products = ProductListResource::new(&listing, &state.app.media);
    let shared = shared_props(req, depot).await?;

    Ok(Json(Page::new(
        COMPONENT,
        req,
        HomeProps { shared, products },
    )))
}
