//! Product Resources
//!
//! JSON projections of product records for the product pages.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::{
    Conversion, MediaUrls,
    data::ProductPage,
    records::{
        DepartmentRef, MediaRecord, ProductOwner, ProductRecord, ProductSummaryRecord,
        VariationOptionRecord, VariationRecord, VariationTypeRecord,
    },
};

/// An image with its resized conversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageResource {
    pub id: i64,
    pub thumb: String,
    pub small: String,
    pub large: String,
}

impl ImageResource {
    fn new(media: &MediaRecord, urls: &MediaUrls) -> Self {
        Self {
            id: media.id.into_i64(),
            thumb: urls.conversion(media, Conversion::Thumb),
            small: urls.conversion(media, Conversion::Small),
            large: urls.conversion(media, Conversion::Large),
        }
    }
}

/// The user selling the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductUserResource {
    pub id: i64,
    pub name: String,
}

impl From<&ProductOwner> for ProductUserResource {
    fn from(owner: &ProductOwner) -> Self {
        Self {
            id: owner.user_id.into_i64(),
            name: owner.user_name.clone(),
        }
    }
}

/// Vendor storefront details shown on listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListingUserResource {
    pub id: i64,
    pub name: String,
    pub store_name: String,
}

impl From<&ProductOwner> for ListingUserResource {
    fn from(owner: &ProductOwner) -> Self {
        Self {
            id: owner.user_id.into_i64(),
            name: owner.user_name.clone(),
            store_name: owner.vendor_name.clone(),
        }
    }
}

/// Department a product is filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct DepartmentResource {
    pub id: i64,
    pub name: String,
}

impl From<&DepartmentRef> for DepartmentResource {
    fn from(department: &DepartmentRef) -> Self {
        Self {
            id: department.id.into_i64(),
            name: department.name.clone(),
        }
    }
}

/// One choice within a variation type, with its gallery images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationOptionResource {
    pub id: i64,
    pub name: String,
    pub images: Vec<ImageResource>,
}

impl VariationOptionResource {
    fn new(option: &VariationOptionRecord, urls: &MediaUrls) -> Self {
        Self {
            id: option.id.into_i64(),
            name: option.name.clone(),
            images: option
                .images
                .iter()
                .map(|image| ImageResource::new(image, urls))
                .collect(),
        }
    }
}

/// A variation type and its options, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationTypeResource {
    pub id: i64,
    pub name: String,

    /// How the choice is presented: `Select`, `Radio` or `Image`.
    #[serde(rename = "type")]
    pub kind: String,

    pub options: Vec<VariationOptionResource>,
}

impl VariationTypeResource {
    fn new(variation_type: &VariationTypeRecord, urls: &MediaUrls) -> Self {
        Self {
            id: variation_type.id.into_i64(),
            name: variation_type.name.clone(),
            kind: variation_type.kind.as_str().to_string(),
            options: variation_type
                .options
                .iter()
                .map(|option| VariationOptionResource::new(option, urls))
                .collect(),
        }
    }
}

/// A priced combination of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationResource {
    pub id: i64,
    pub variation_type_option_ids: Vec<i64>,
    pub quantity: Option<u32>,

    #[salvo(schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,
}

impl From<&VariationRecord> for VariationResource {
    fn from(variation: &VariationRecord) -> Self {
        Self {
            id: variation.id.into_i64(),
            variation_type_option_ids: variation
                .option_ids
                .iter()
                .map(|id| id.into_i64())
                .collect(),
            quantity: variation.quantity,
            price: variation.price,
        }
    }
}

/// Full product detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResource {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,

    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub quantity: u32,

    /// Original of the first gallery image.
    pub image: Option<String>,

    pub images: Vec<ImageResource>,
    pub user: ProductUserResource,
    pub department: DepartmentResource,

    #[serde(rename = "variationTypes")]
    pub variation_types: Vec<VariationTypeResource>,

    pub variations: Vec<VariationResource>,
}

impl ProductResource {
    pub(crate) fn new(product: &ProductRecord, urls: &MediaUrls) -> Self {
        Self {
            id: product.id.into_i64(),
            title: product.title.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            image: product.images.first().map(|image| urls.original(image)),
            images: product
                .images
                .iter()
                .map(|image| ImageResource::new(image, urls))
                .collect(),
            user: (&product.owner).into(),
            department: (&product.department).into(),
            variation_types: product
                .variation_types
                .iter()
                .map(|variation_type| VariationTypeResource::new(variation_type, urls))
                .collect(),
            variations: product.variations.iter().map(Into::into).collect(),
        }
    }
}

/// A product card on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductListItemResource {
    pub id: i64,
    pub title: String,
    pub slug: String,

    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub quantity: u32,
    pub image: Option<String>,
    pub user: ListingUserResource,
    pub department: DepartmentResource,
}

impl ProductListItemResource {
    fn new(product: &ProductSummaryRecord, urls: &MediaUrls) -> Self {
        Self {
            id: product.id.into_i64(),
            title: product.title.clone(),
            slug: product.slug.clone(),
            price: product.price,
            quantity: product.quantity,
            image: product
                .image
                .as_ref()
                .map(|image| urls.conversion(image, Conversion::Small)),
            user: (&product.owner).into(),
            department: (&product.department).into(),
        }
    }
}

/// Page position and totals for a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationMeta {
    pub current_page: u32,
    pub last_page: u64,
    pub per_page: u32,
    pub total: u64,
}

/// One page of product cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductListResource {
    pub data: Vec<ProductListItemResource>,
    pub meta: PaginationMeta,
}

impl ProductListResource {
    pub(crate) fn new(page: &ProductPage, urls: &MediaUrls) -> Self {
        Self {
            data: page
                .products
                .iter()
                .map(|product| ProductListItemResource::new(product, urls))
                .collect(),
            meta: PaginationMeta {
                current_page: page.pagination.page(),
                last_page: page.last_page(),
                per_page: page.pagination.per_page(),
                total: page.total,
            },
        }
    }
}
