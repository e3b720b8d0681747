//! Test helpers.

use std::{collections::BTreeMap, sync::Arc};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            CartService, CartStoreError,
            records::{CartItem, CartItemOption, CartItemUuid, VariationTypeRef, VendorRef},
            stores::{CART_COOKIE_NAME, GuestCartEntry, MockUserCartStores, encode_entries},
        },
        products::{
            MediaUrls, MockProductsService,
            records::{
                DepartmentId, DepartmentRef, MediaId, MediaRecord, OptionId, OptionWithTypeRecord,
                ProductId, ProductOwner, ProductRecord, ProductStatus, ProductSummaryRecord,
                VariationId, VariationOptionRecord, VariationRecord, VariationTypeId,
                VariationTypeKind, VariationTypeRecord,
            },
        },
        users::records::{UserId, UserRecord},
    },
};

use crate::{auth, carts, state::State};

pub(crate) fn media_urls() -> MediaUrls {
    MediaUrls::new("https://cdn.test/media/")
}

pub(crate) fn make_user(id: i64) -> UserRecord {
    UserRecord {
        id: UserId::from_i64(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn media(id: i64, file_name: &str) -> MediaRecord {
    MediaRecord {
        id: MediaId::from_i64(id),
        file_name: file_name.to_string(),
    }
}

fn kitchen() -> DepartmentRef {
    DepartmentRef {
        id: DepartmentId::from_i64(3),
        name: "Kitchen".to_string(),
    }
}

/// Product 1, "Mug" at 19.99 from vendor 7, with Colour (Red 5, Blue 6).
///
/// Blue costs 24.50 with 4 in stock.
pub(crate) fn make_product() -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(1),
        title: "Mug".to_string(),
        slug: "mug".to_string(),
        description: "A sturdy mug.".to_string(),
        price: Decimal::new(1999, 2),
        quantity: 10,
        status: ProductStatus::Published,
        owner: ProductOwner {
            user_id: UserId::from_i64(7),
            user_name: "Maker".to_string(),
            vendor_name: "Mugs Inc".to_string(),
        },
        department: kitchen(),
        images: vec![media(100, "mug.png")],
        variation_types: vec![VariationTypeRecord {
            id: VariationTypeId::from_i64(1),
            name: "Colour".to_string(),
            kind: VariationTypeKind::Radio,
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
        }],
        variations: vec![VariationRecord {
            id: VariationId::from_i64(1),
            option_ids: vec![OptionId::from_i64(6)],
            quantity: Some(4),
            price: Some(Decimal::new(2450, 2)),
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_summary(id: i64, slug: &str) -> ProductSummaryRecord {
    make_summary_for(id, slug, 7, "Mugs Inc")
}

pub(crate) fn make_summary_for(
    id: i64,
    slug: &str,
    owner: i64,
    vendor_name: &str,
) -> ProductSummaryRecord {
    ProductSummaryRecord {
        id: ProductId::from_i64(id),
        title: format!("Product {id}"),
        slug: slug.to_string(),
        price: Decimal::new(1999, 2),
        quantity: 10,
        owner: ProductOwner {
            user_id: UserId::from_i64(owner),
            user_name: format!("{vendor_name} Owner"),
            vendor_name: vendor_name.to_string(),
        },
        department: kitchen(),
        image: Some(media(id * 10, "front.png")),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An enriched line with the Red option of Colour.
pub(crate) fn make_cart_item(product: i64, vendor: i64, quantity: u32) -> CartItem {
    CartItem {
        uuid: CartItemUuid::new(),
        product_id: ProductId::from_i64(product),
        title: format!("Product {product}"),
        slug: format!("product-{product}"),
        price: Decimal::new(1999, 2),
        quantity,
        option_ids: [(VariationTypeId::from_i64(1), OptionId::from_i64(5))]
            .into_iter()
            .collect(),
        options: vec![CartItemOption {
            id: OptionId::from_i64(5),
            name: "Red".to_string(),
            variation_type: VariationTypeRef {
                id: VariationTypeId::from_i64(1),
                name: "Colour".to_string(),
            },
        }],
        image: None,
        vendor: VendorRef {
            id: UserId::from_i64(vendor),
            name: "Mugs Inc".to_string(),
        },
    }
}

fn colour_options() -> Vec<OptionWithTypeRecord> {
    vec![
        OptionWithTypeRecord {
            id: OptionId::from_i64(5),
            name: "Red".to_string(),
            variation_type_id: VariationTypeId::from_i64(1),
            variation_type_name: "Colour".to_string(),
            image: None,
        },
        OptionWithTypeRecord {
            id: OptionId::from_i64(6),
            name: "Blue".to_string(),
            variation_type_id: VariationTypeId::from_i64(1),
            variation_type_name: "Colour".to_string(),
            image: Some(media(200, "blue.png")),
        },
    ]
}

/// Answer the product and option lookups made when a cart is read.
pub(crate) fn expect_cart_reads(
    products: &mut MockProductsService,
    summaries: Vec<ProductSummaryRecord>,
) {
    products
        .expect_get_cart_products()
        .returning(move |_| Ok(summaries.clone()));

    products.expect_get_options().returning(|ids| {
        Ok(colour_options()
            .into_iter()
            .filter(|option| ids.contains(&option.id))
            .collect())
    });
}

/// A `Cookie` header value carrying the given guest cart lines.
pub(crate) fn cart_cookie_header(entries: &[GuestCartEntry]) -> Result<String, CartStoreError> {
    Ok(format!("{CART_COOKIE_NAME}={}", encode_entries(entries)?))
}

/// The lines of a guest cart cookie value.
pub(crate) fn decode_cart_cookie(value: &str) -> Result<Vec<GuestCartEntry>, CartStoreError> {
    let json = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|error| CartStoreError::Malformed {
            reason: error.to_string(),
        })?;

    let cart: BTreeMap<String, GuestCartEntry> =
        serde_json::from_slice(&json).map_err(|error| CartStoreError::Malformed {
            reason: error.to_string(),
        })?;

    Ok(cart.into_values().collect())
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_get_product_by_slug().never();
    products.expect_get_cart_products().never();
    products.expect_get_options().never();

    products
}

fn strict_stores_mock() -> MockUserCartStores {
    let mut stores = MockUserCartStores::new();

    stores.expect_store_for().never();

    stores
}

pub(crate) fn state_with(
    products: MockProductsService,
    auth: MockAuthService,
    stores: MockUserCartStores,
) -> Arc<State> {
    let products: Arc<MockProductsService> = Arc::new(products);

    let app = AppContext {
        products: products.clone(),
        auth: Arc::new(auth),
        carts: Arc::new(CartService::new(products, media_urls())),
        cart_stores: Arc::new(stores),
        media: media_urls(),
    };

    State::shared(app, crate::state::SiteSettings::default())
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_products_mock(), auth, strict_stores_mock())
}

/// Serve `route` as a guest page: state, identity and cart session, without CSRF.
pub(crate) fn page_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(
                products,
                strict_auth_mock(),
                strict_stores_mock(),
            )))
            .hoop(auth::middleware::handler)
            .hoop(carts::session::handler)
            .push(route),
    )
}
