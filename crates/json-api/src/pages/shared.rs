//! Shared page props.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use storefront_app::domain::{
    carts::{
        records::{CartItem, CartLoad},
        summary,
    },
    users::records::UserRecord,
};

use crate::{carts::resources::CartItemResource, csrf::CsrfToken, extensions::*, pages};

/// Signed-in user as exposed to pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResource {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&UserRecord> for UserResource {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.into_i64(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Authentication state, `user` is `None` for guests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthProps {
    pub user: Option<UserResource>,
}

/// Props every page receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct SharedProps {
    pub csrf_token: String,
    pub auth: AuthProps,
    pub routes: BTreeMap<String, String>,
    pub location: String,

    #[serde(rename = "totalPrice")]
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,

    #[serde(rename = "totalQuantity")]
    pub total_quantity: u64,

    #[serde(rename = "miniCartItems")]
    pub mini_cart_items: Vec<CartItemResource>,
}

/// Build the shared props for the current request.
///
/// A cart that cannot be read renders as empty, so the page still loads.
pub(crate) async fn shared_props(req: &Request, depot: &Depot) -> Result<SharedProps, StatusError> {
    let session = depot.cart_session_or_500()?;

    let items: &[CartItem] = match session.load().await {
        Ok(CartLoad::Loaded(items)) => items.as_slice(),
        Ok(CartLoad::Degraded { reason }) => {
            warn!(%reason, "rendering unreadable cart as empty");

            &[]
        }
        Err(source) => {
            error!("failed to load cart for page props: {source}");

            &[]
        }
    };

    Ok(SharedProps {
        csrf_token: depot
            .obtain::<CsrfToken>()
            .map(|token| token.0.clone())
            .unwrap_or_default(),
        auth: AuthProps {
            user: depot.current_user().map(Into::into),
        },
        routes: pages::routes(),
        location: pages::request_location(req),
        total_price: summary::total_price(items),
        total_quantity: summary::total_quantity(items),
        mini_cart_items: items.iter().map(Into::into).collect(),
    })
}
