//! Cart Records

use rust_decimal::Decimal;

use crate::{
    domain::{
        carts::keys::{CartKey, OptionSelection},
        products::records::{OptionId, ProductId, VariationTypeId},
        users::records::UserId,
    },
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<StoredCartItem>;

/// A raw cart line as held by a cart store, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCartItem {
    pub uuid: CartItemUuid,
    pub key: CartKey,
    pub quantity: u32,
    pub price: Decimal,
}

/// Variation Type Reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariationTypeRef {
    pub id: VariationTypeId,
    pub name: String,
}

/// A chosen option as shown on a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemOption {
    pub id: OptionId,
    pub name: String,
    pub variation_type: VariationTypeRef,
}

/// The selling vendor of a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRef {
    pub id: UserId,
    pub name: String,
}

/// Cart Item
///
/// A cart line enriched with current product and option data. `price` is the
/// unit price captured when the line was last added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_id: ProductId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub quantity: u32,
    pub option_ids: OptionSelection,
    pub options: Vec<CartItemOption>,
    pub image: Option<String>,
    pub vendor: VendorRef,
}

impl CartItem {
    /// Unit price times quantity, `None` when it does not fit a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// The cart lines sold by one vendor, with subtotals.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorCartGroup {
    pub vendor: VendorRef,
    pub items: Vec<CartItem>,
    pub total_quantity: u64,
    pub total_price: Decimal,
}

/// Outcome of reading a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartLoad {
    Loaded(Vec<CartItem>),

    /// The stored cart could not be decoded; it reads as empty.
    Degraded { reason: String },
}

impl CartLoad {
    /// The loaded items, empty when degraded.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        match self {
            Self::Loaded(items) => items,
            Self::Degraded { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// The cart handed to payment for one vendor (or all vendors).
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub groups: Vec<VendorCartGroup>,
    pub total_quantity: u64,
    pub total_price: Decimal,
}
