//! Cart session middleware.
//!
//! Picks the cart store for the caller, injects a [`CartSession`] for the
//! handlers and, for guests, writes the cart cookie back after a change.

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, SameSite, time::Duration},
    prelude::*,
};
use storefront_app::domain::carts::{
    CartSession,
    stores::{CART_COOKIE_NAME, CookieCartStore},
};
use tracing::error;

use crate::{extensions::*, state::State};

const CART_COOKIE_LIFETIME_DAYS: i64 = 365;

/// Resolve the cart session for this request and place it in the depot.
/// Guest carts are written back to their cookie once the handler is done.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let carts = Arc::clone(&state.app.carts);

    let guest_store = match depot.current_user().map(|user| user.id) {
        Some(user) => {
            depot.inject(CartSession::new(carts, state.app.cart_stores.store_for(user)));

            None
        }
        None => {
            let raw = req
                .cookie(CART_COOKIE_NAME)
                .map(|cookie| cookie.value().to_owned());
            let store = Arc::new(CookieCartStore::new(raw));

            depot.inject(CartSession::new(carts, store.clone()));

            Some(store)
        }
    };

    ctrl.call_next(req, depot, res).await;

    let Some(store) = guest_store else {
        return;
    };

    match store.pending_cookie_value().await {
        Ok(Some(value)) => {
            res.add_cookie(cart_cookie(value, state.site.cookie_secure));
        }
        Ok(None) => {}
        Err(source) => error!("failed to encode guest cart cookie: {source}"),
    }
}

fn cart_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((CART_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(CART_COOKIE_LIFETIME_DAYS))
        .build()
}
