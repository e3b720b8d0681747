//! Page payloads
//!
//! Every page response is `{ component, url, props }`. The props of each page
//! carry the [`SharedProps`] alongside its own fields.

use std::{collections::BTreeMap, fmt::Debug};

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

mod shared;

pub(crate) use shared::{AuthProps, SharedProps, UserResource, shared_props};

/// Named routes exposed to the front end.
pub(crate) const ROUTES: &[(&str, &str)] = &[
    ("home", "/"),
    ("product.show", "/products/{slug}"),
    ("cart.index", "/cart"),
    ("cart.store", "/cart/{product}"),
    ("cart.update", "/cart/{product}"),
    ("cart.destroy", "/cart/{product}"),
    ("cart.checkout", "/cart/checkout"),
];

/// Page envelope: the component to render and its props.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Page<P: ToSchema + Debug + 'static> {
    /// Front-end component that renders the page.
    pub component: String,

    /// Path and query the page was requested with.
    pub url: String,

    pub props: P,
}

impl<P: ToSchema + Debug + 'static> Page<P> {
    pub(crate) fn new(component: &str, req: &Request, props: P) -> Self {
        Self {
            component: component.to_string(),
            url: request_location(req),
            props,
        }
    }
}

/// Named route table shared with the front end.
pub(crate) fn routes() -> BTreeMap<String, String> {
    ROUTES
        .iter()
        .map(|(name, path)| ((*name).to_string(), (*path).to_string()))
        .collect()
}

/// Path and query of the request, or just the path when there is no query.
pub(crate) fn request_location(req: &Request) -> String {
    req.uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string)
}
