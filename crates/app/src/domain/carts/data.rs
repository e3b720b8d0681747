//! Carts Data

use rust_decimal::Decimal;

use crate::domain::carts::{keys::CartKey, records::CartItemUuid};

/// A line to add to a cart store.
///
/// `uuid` is only used when the key is not in the cart yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub key: CartKey,
    pub quantity: u32,
    pub price: Decimal,
}
