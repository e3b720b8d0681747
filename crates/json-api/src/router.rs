//! App Router

use salvo::Router;

use crate::{auth, carts, csrf, products};

/// Storefront pages and cart actions.
///
/// Identity is resolved before the CSRF check so bearer callers can skip it,
/// and the cart session is opened last so it sees the resolved identity.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .hoop(csrf::handler)
        .hoop(carts::session::handler)
        .get(products::index::handler)
        .push(Router::with_path("products/{slug}").get(products::show::handler))
        .push(
            Router::with_path("cart")
                .get(carts::index::handler)
                .push(Router::with_path("checkout").post(carts::checkout::handler))
                .push(
                    Router::with_path("{product}")
                        .post(carts::create::handler)
                        .put(carts::update::handler)
                        .delete(carts::delete::handler),
                ),
        )
}
