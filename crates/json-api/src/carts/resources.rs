//! Cart Resources

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{
    CartItem, CartItemOption, Checkout, VendorCartGroup, VendorRef,
};

/// Vendor a cart group belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorResource {
    pub id: i64,
    pub name: String,
}

impl From<&VendorRef> for VendorResource {
    fn from(vendor: &VendorRef) -> Self {
        Self {
            id: vendor.id.into_i64(),
            name: vendor.name.clone(),
        }
    }
}

/// Variation type an option belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationTypeRefResource {
    pub id: i64,
    pub name: String,
}

/// Chosen option on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartOptionResource {
    pub id: i64,
    pub name: String,

    #[serde(rename = "type")]
    pub variation_type: VariationTypeRefResource,
}

impl From<&CartItemOption> for CartOptionResource {
    fn from(option: &CartItemOption) -> Self {
        Self {
            id: option.id.into_i64(),
            name: option.name.clone(),
            variation_type: VariationTypeRefResource {
                id: option.variation_type.id.into_i64(),
                name: option.variation_type.name.clone(),
            },
        }
    }
}

/// One enriched cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResource {
    pub id: Uuid,
    pub product_id: i64,
    pub title: String,
    pub slug: String,

    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub quantity: u32,

    /// Chosen option per variation type id.
    pub option_ids: BTreeMap<i64, i64>,

    pub options: Vec<CartOptionResource>,
    pub image: Option<String>,
    pub vendor: VendorResource,
}

impl From<&CartItem> for CartItemResource {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            product_id: item.product_id.into_i64(),
            title: item.title.clone(),
            slug: item.slug.clone(),
            price: item.price,
            quantity: item.quantity,
            option_ids: item
                .option_ids
                .iter()
                .map(|(variation_type, option)| (variation_type.into_i64(), option.into_i64()))
                .collect(),
            options: item.options.iter().map(Into::into).collect(),
            image: item.image.clone(),
            vendor: (&item.vendor).into(),
        }
    }
}

/// Cart lines sold by one vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VendorCartGroupResource {
    pub vendor: VendorResource,
    pub items: Vec<CartItemResource>,

    #[serde(rename = "totalQuantity")]
    pub total_quantity: u64,

    #[serde(rename = "totalPrice")]
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,
}

impl From<&VendorCartGroup> for VendorCartGroupResource {
    fn from(group: &VendorCartGroup) -> Self {
        Self {
            vendor: (&group.vendor).into(),
            items: group.items.iter().map(Into::into).collect(),
            total_quantity: group.total_quantity,
            total_price: group.total_price,
        }
    }
}

/// The cart handed to payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResource {
    pub groups: Vec<VendorCartGroupResource>,

    #[serde(rename = "totalQuantity")]
    pub total_quantity: u64,

    #[serde(rename = "totalPrice")]
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,
}

impl From<&Checkout> for CheckoutResource {
    fn from(checkout: &Checkout) -> Self {
        Self {
            groups: checkout.groups.iter().map(Into::into).collect(),
            total_quantity: checkout.total_quantity,
            total_price: checkout.total_price,
        }
    }
}
