//! In-memory product graphs shared by unit tests.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    products::records::{
        DepartmentId, DepartmentRef, MediaId, MediaRecord, OptionId, OptionWithTypeRecord,
        ProductId, ProductOwner, ProductRecord, ProductStatus, ProductSummaryRecord, VariationId,
        VariationOptionRecord, VariationRecord, VariationTypeId, VariationTypeKind,
        VariationTypeRecord,
    },
    users::records::UserId,
};

pub(crate) fn owner(user_id: i64, vendor_name: &str) -> ProductOwner {
    ProductOwner {
        user_id: UserId::from_i64(user_id),
        user_name: format!("{vendor_name} Owner"),
        vendor_name: vendor_name.to_string(),
    }
}

pub(crate) fn media(id: i64, file_name: &str) -> MediaRecord {
    MediaRecord {
        id: MediaId::from_i64(id),
        file_name: file_name.to_string(),
    }
}

/// Product 1, "Mug" at 19.99, with Colour (Red 5, Blue 6) and Size (S 9, M 10).
///
/// Red+S is a variation without overrides, Blue+M costs 24.50 with 4 in stock.
pub(crate) fn product_with_variations() -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(1),
        title: "Mug".to_string(),
        slug: "mug".to_string(),
        description: "A sturdy mug.".to_string(),
        price: Decimal::new(1999, 2),
        quantity: 10,
        status: ProductStatus::Published,
        owner: owner(7, "Mugs Inc"),
        department: DepartmentRef {
            id: DepartmentId::from_i64(3),
            name: "Kitchen".to_string(),
        },
        images: vec![media(100, "mug.png"), media(101, "mug-side.png")],
        variation_types: vec![
            VariationTypeRecord {
                id: VariationTypeId::from_i64(1),
                name: "Colour".to_string(),
                kind: VariationTypeKind::Image,
                options: vec![
                    VariationOptionRecord {
                        id: OptionId::from_i64(5),
                        name: "Red".to_string(),
                        images: Vec::new(),
                    },
                    VariationOptionRecord {
                        id: OptionId::from_i64(6),
                        name: "Blue".to_string(),
                        images: vec![media(200, "blue.png")],
                    },
                ],
            },
            VariationTypeRecord {
                id: VariationTypeId::from_i64(2),
                name: "Size".to_string(),
                kind: VariationTypeKind::Select,
                options: vec![
                    VariationOptionRecord {
                        id: OptionId::from_i64(9),
                        name: "S".to_string(),
                        images: Vec::new(),
                    },
                    VariationOptionRecord {
                        id: OptionId::from_i64(10),
                        name: "M".to_string(),
                        images: Vec::new(),
                    },
                ],
            },
        ],
        variations: vec![
            VariationRecord {
                id: VariationId::from_i64(50),
                option_ids: vec![OptionId::from_i64(5), OptionId::from_i64(9)],
                quantity: None,
                price: None,
            },
            VariationRecord {
                id: VariationId::from_i64(51),
                option_ids: vec![OptionId::from_i64(6), OptionId::from_i64(10)],
                quantity: Some(4),
                price: Some(Decimal::new(2450, 2)),
            },
        ],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A product without variation types.
pub(crate) fn plain_product(id: i64, price: Decimal, owner: ProductOwner) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        title: format!("Product {id}"),
        slug: format!("product-{id}"),
        description: String::new(),
        price,
        quantity: 100,
        status: ProductStatus::Published,
        owner,
        department: DepartmentRef {
            id: DepartmentId::from_i64(3),
            name: "Kitchen".to_string(),
        },
        images: vec![media(id * 10, "front.png")],
        variation_types: Vec::new(),
        variations: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// The listing/cart projection of a full product.
pub(crate) fn summary_of(product: &ProductRecord) -> ProductSummaryRecord {
    ProductSummaryRecord {
        id: product.id,
        title: product.title.clone(),
        slug: product.slug.clone(),
        price: product.price,
        quantity: product.quantity,
        owner: product.owner.clone(),
        department: product.department.clone(),
        image: product.images.first().cloned(),
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

/// Every option of a product, flattened with its parent type.
pub(crate) fn options_of(product: &ProductRecord) -> Vec<OptionWithTypeRecord> {
    product
        .variation_types
        .iter()
        .flat_map(|variation_type| {
            variation_type
                .options
                .iter()
                .map(|option| OptionWithTypeRecord {
                    id: option.id,
                    name: option.name.clone(),
                    variation_type_id: variation_type.id,
                    variation_type_name: variation_type.name.clone(),
                    image: option.images.first().cloned(),
                })
        })
        .collect()
}
