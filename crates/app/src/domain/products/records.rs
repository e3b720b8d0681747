//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{carts::keys::OptionSelection, users::records::UserId},
    ids::TypedId,
};

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Department ID
pub type DepartmentId = TypedId<DepartmentRef>;

/// Variation Type ID
pub type VariationTypeId = TypedId<VariationTypeRecord>;

/// Variation Type Option ID
pub type OptionId = TypedId<VariationOptionRecord>;

/// Priced Variation ID
pub type VariationId = TypedId<VariationRecord>;

/// Media ID
pub type MediaId = TypedId<MediaRecord>;

/// Publication state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Draft,
    Published,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

/// How a variation type is presented for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationTypeKind {
    Select,
    Radio,
    Image,
}

impl VariationTypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Radio => "Radio",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for VariationTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown enumerated column value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {column} value: {value}")]
pub struct UnknownVariant {
    pub column: &'static str,
    pub value: String,
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(UnknownVariant {
                column: "status",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for VariationTypeKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Select" => Ok(Self::Select),
            "Radio" => Ok(Self::Radio),
            "Image" => Ok(Self::Image),
            other => Err(UnknownVariant {
                column: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// An image attached to a product or variation option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub id: MediaId,
    pub file_name: String,
}

/// The selling identity of a product: its owning user and their vendor store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOwner {
    pub user_id: UserId,
    pub user_name: String,
    pub vendor_name: String,
}

/// Department Reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRef {
    pub id: DepartmentId,
    pub name: String,
}

/// Variation Type Record
#[derive(Debug, Clone, PartialEq)]
pub struct VariationTypeRecord {
    pub id: VariationTypeId,
    pub name: String,
    pub kind: VariationTypeKind,
    pub options: Vec<VariationOptionRecord>,
}

/// Variation Option Record
#[derive(Debug, Clone, PartialEq)]
pub struct VariationOptionRecord {
    pub id: OptionId,
    pub name: String,
    pub images: Vec<MediaRecord>,
}

/// Priced Variation Record
///
/// A specific combination of options with its own price/stock override.
/// `option_ids` is kept sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationRecord {
    pub id: VariationId,
    pub option_ids: Vec<OptionId>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
}

/// Product Record
///
/// The full product graph used by the detail page and the add-to-cart path.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub status: ProductStatus,
    pub owner: ProductOwner,
    pub department: DepartmentRef,
    pub images: Vec<MediaRecord>,
    pub variation_types: Vec<VariationTypeRecord>,
    pub variations: Vec<VariationRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// The first option of every variation type, keyed by type.
    #[must_use]
    pub fn default_selection(&self) -> OptionSelection {
        self.variation_types
            .iter()
            .filter_map(|variation_type| {
                variation_type
                    .options
                    .first()
                    .map(|option| (variation_type.id, option.id))
            })
            .collect()
    }

    /// Whether every chosen option belongs to the chosen variation type of this product.
    #[must_use]
    pub fn accepts_selection(&self, selection: &OptionSelection) -> bool {
        selection.iter().all(|(variation_type, option)| {
            self.variation_types.iter().any(|candidate| {
                candidate.id == variation_type
                    && candidate.options.iter().any(|known| known.id == option)
            })
        })
    }

    /// The selection with every variation type it leaves out set to that type's first option.
    #[must_use]
    pub fn complete_selection(&self, selection: &OptionSelection) -> OptionSelection {
        let mut completed = self.default_selection();

        for (variation_type, option) in selection.iter() {
            completed.insert(variation_type, option);
        }

        completed
    }

    /// The priced variation whose option set equals the selection, if any.
    #[must_use]
    pub fn variation_for_options(&self, selection: &OptionSelection) -> Option<&VariationRecord> {
        let mut selected = selection.option_ids();
        selected.sort_unstable();

        self.variations
            .iter()
            .find(|variation| variation.option_ids == selected)
    }

    /// Effective unit price for a selection: the matching variation's price, else the base price.
    #[must_use]
    pub fn price_for_options(&self, selection: &OptionSelection) -> Decimal {
        self.variation_for_options(selection)
            .and_then(|variation| variation.price)
            .unwrap_or(self.price)
    }

    /// Effective stock for a selection. `None` means the variation does not track stock.
    #[must_use]
    pub fn quantity_for_options(&self, selection: &OptionSelection) -> Option<u32> {
        match self.variation_for_options(selection) {
            Some(variation) => variation.quantity,
            None => Some(self.quantity),
        }
    }
}

/// Product Summary Record
///
/// The flat product row used by listings and cart enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummaryRecord {
    pub id: ProductId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub quantity: u32,
    pub owner: ProductOwner,
    pub department: DepartmentRef,
    pub image: Option<MediaRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A variation option together with its parent type, for cart enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionWithTypeRecord {
    pub id: OptionId,
    pub name: String,
    pub variation_type_id: VariationTypeId,
    pub variation_type_name: String,
    pub image: Option<MediaRecord>,
}
