//! Carts service.
//!
//! Reconciles the raw lines of a [`CartStore`] with the current catalogue.

use std::{
    collections::BTreeSet,
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::domain::{
    carts::{
        data::NewCartItem,
        errors::{CartStoreError, CartsServiceError},
        keys::{CartKey, OptionSelection},
        records::{
            CartItem, CartItemOption, CartItemUuid, CartLoad, StoredCartItem, VariationTypeRef,
            VendorRef,
        },
        stores::CartStore,
    },
    products::{
        Conversion, MediaUrls, ProductsService,
        records::{OptionId, OptionWithTypeRecord, ProductId, ProductSummaryRecord},
    },
};

#[derive(Clone)]
pub struct CartService {
    products: Arc<dyn ProductsService>,
    media: MediaUrls,
}

impl Debug for CartService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartService")
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl CartService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, media: MediaUrls) -> Self {
        Self { products, media }
    }

    /// Read the cart and enrich each line with current product and option data.
    ///
    /// Lines whose product is no longer listed, or whose options no longer
    /// exist, are left out, as are lines that would push the cart total past
    /// what a `Decimal` holds. An undecodable guest cookie reads as
    /// [`CartLoad::Degraded`].
    ///
    /// # Errors
    ///
    /// Returns an error when the store or the catalogue cannot be read.
    pub async fn get_cart_items(
        &self,
        store: &dyn CartStore,
    ) -> Result<CartLoad, CartsServiceError> {
        let lines = match store.load().await {
            Ok(lines) => lines,
            Err(CartStoreError::Malformed { reason }) => {
                warn!(%reason, "stored cart could not be read");

                return Ok(CartLoad::Degraded { reason });
            }
            Err(error) => return Err(error.into()),
        };

        if lines.is_empty() {
            return Ok(CartLoad::Loaded(Vec::new()));
        }

        let product_ids: Vec<ProductId> = lines
            .iter()
            .map(|line| line.key.product)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let option_ids: Vec<OptionId> = lines
            .iter()
            .flat_map(|line| line.key.selection.option_ids())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let products: FxHashMap<ProductId, ProductSummaryRecord> = self
            .products
            .get_cart_products(&product_ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let options: FxHashMap<OptionId, OptionWithTypeRecord> = self
            .products
            .get_options(&option_ids)
            .await?
            .into_iter()
            .map(|option| (option.id, option))
            .collect();

        let mut cart_total = Decimal::ZERO;

        let items = lines
            .into_iter()
            .filter_map(|line| self.enrich(line, &products, &options))
            .filter(|item| {
                match item
                    .line_total()
                    .and_then(|line_total| cart_total.checked_add(line_total))
                {
                    Some(total) => {
                        cart_total = total;

                        true
                    }
                    None => {
                        warn!(
                            product = %item.product_id,
                            quantity = item.quantity,
                            price = %item.price,
                            "skipping cart line whose total overflows"
                        );

                        false
                    }
                }
            })
            .collect();

        Ok(CartLoad::Loaded(items))
    }

    fn enrich(
        &self,
        line: StoredCartItem,
        products: &FxHashMap<ProductId, ProductSummaryRecord>,
        options: &FxHashMap<OptionId, OptionWithTypeRecord>,
    ) -> Option<CartItem> {
        let Some(product) = products.get(&line.key.product) else {
            debug!(key = %line.key, "skipping cart line for unlisted product");

            return None;
        };

        let mut chosen = Vec::with_capacity(line.key.selection.len());
        let mut image = None;

        for option_id in line.key.selection.option_ids() {
            let Some(option) = options.get(&option_id) else {
                debug!(key = %line.key, option = %option_id, "skipping cart line for missing option");

                return None;
            };

            if image.is_none() {
                image = option
                    .image
                    .as_ref()
                    .map(|media| self.media.conversion(media, Conversion::Small));
            }

            chosen.push(CartItemOption {
                id: option.id,
                name: option.name.clone(),
                variation_type: VariationTypeRef {
                    id: option.variation_type_id,
                    name: option.variation_type_name.clone(),
                },
            });
        }

        let image = image.or_else(|| {
            product
                .image
                .as_ref()
                .map(|media| self.media.conversion(media, Conversion::Small))
        });

        Some(CartItem {
            uuid: line.uuid,
            product_id: product.id,
            title: product.title.clone(),
            slug: product.slug.clone(),
            price: line.price,
            quantity: line.quantity,
            option_ids: line.key.selection,
            options: chosen,
            image,
            vendor: VendorRef {
                id: product.owner.user_id,
                name: product.owner.vendor_name.clone(),
            },
        })
    }

    /// Add `quantity` of a product to the cart at its current price.
    ///
    /// Variation types the selection leaves out get their first option.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::InvalidQuantity`] for a zero quantity,
    /// [`CartsServiceError::ProductNotFound`] when the product is not listed and
    /// [`CartsServiceError::InvalidSelection`] when an option is not the product's.
    pub async fn add_item(
        &self,
        store: &dyn CartStore,
        product: ProductId,
        quantity: u32,
        selection: Option<OptionSelection>,
    ) -> Result<(), CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let product = self.products.get_product(product).await?;

        let selection = selection.unwrap_or_else(|| product.default_selection());

        if !product.accepts_selection(&selection) {
            return Err(CartsServiceError::InvalidSelection);
        }

        let selection = product.complete_selection(&selection);

        let price = product.price_for_options(&selection);

        store
            .add(NewCartItem {
                uuid: CartItemUuid::new(),
                key: CartKey::new(product.id, selection),
                quantity,
                price,
            })
            .await?;

        Ok(())
    }

    /// Replace the quantity of a line. Does nothing when the line is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::InvalidQuantity`] for a zero quantity, or a
    /// store error.
    pub async fn update_item_quantity(
        &self,
        store: &dyn CartStore,
        product: ProductId,
        quantity: u32,
        selection: OptionSelection,
    ) -> Result<(), CartsServiceError> {
        if quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let key = CartKey::new(product, selection);

        if !store.update_quantity(&key, quantity).await? {
            debug!(%key, "quantity update for a line not in the cart");
        }

        Ok(())
    }

    /// Remove a line. Does nothing when the line is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub async fn remove_item(
        &self,
        store: &dyn CartStore,
        product: ProductId,
        selection: OptionSelection,
    ) -> Result<(), CartsServiceError> {
        let key = CartKey::new(product, selection);

        if !store.remove(&key).await? {
            debug!(%key, "removal of a line not in the cart");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{
                stores::{CookieCartStore, MockCartStore, PgCartStore},
                summary::{total_price, total_quantity},
            },
            products::{
                MockProductsService, ProductsServiceError,
                fixtures::{options_of, owner, plain_product, product_with_variations, summary_of},
                records::{ProductRecord, VariationTypeId},
            },
            users::records::VendorStatus,
        },
        test::{
            TestContext,
            helpers::{ProductSeed, seed_product, seed_shopper, seed_vendor},
        },
    };

    use super::*;

    /// A products service that knows exactly the given products.
    fn catalogue(products: Vec<ProductRecord>) -> MockProductsService {
        let mut mock = MockProductsService::new();

        let by_id = products.clone();
        mock.expect_get_product().returning(move |id| {
            by_id
                .iter()
                .find(|product| product.id == id)
                .cloned()
                .ok_or(ProductsServiceError::NotFound)
        });

        let summaries = products.clone();
        mock.expect_get_cart_products().returning(move |ids| {
            Ok(summaries
                .iter()
                .filter(|product| ids.contains(&product.id))
                .map(summary_of)
                .collect())
        });

        mock.expect_get_options().returning(move |ids| {
            Ok(products
                .iter()
                .flat_map(options_of)
                .filter(|option| ids.contains(&option.id))
                .collect())
        });

        mock
    }

    fn service(products: Vec<ProductRecord>) -> CartService {
        CartService::new(Arc::new(catalogue(products)), MediaUrls::new("/storage"))
    }

    fn selection(pairs: &[(i64, i64)]) -> OptionSelection {
        pairs
            .iter()
            .map(|(variation_type, option)| {
                (
                    VariationTypeId::from_i64(*variation_type),
                    OptionId::from_i64(*option),
                )
            })
            .collect()
    }

    async fn loaded(service: &CartService, store: &dyn CartStore) -> Result<Vec<CartItem>, CartsServiceError> {
        match service.get_cart_items(store).await? {
            CartLoad::Loaded(items) => Ok(items),
            CartLoad::Degraded { reason } => panic!("cart unexpectedly degraded: {reason}"),
        }
    }

    #[tokio::test]
    async fn guest_add_update_remove_scenario() -> TestResult {
        let product = plain_product(1, Decimal::new(1999, 2), owner(7, "Mugs Inc"));
        let service = service(vec![product]);
        let store = CookieCartStore::new(None);

        service.add_item(&store, ProductId::from_i64(1), 2, None).await?;

        let items = loaded(&service, &store).await?;
        assert_eq!(total_quantity(&items), 2);
        assert_eq!(total_price(&items), Decimal::new(3998, 2));

        service.add_item(&store, ProductId::from_i64(1), 1, None).await?;

        let items = loaded(&service, &store).await?;
        assert_eq!(items.len(), 1);
        assert_eq!(total_quantity(&items), 3);
        assert_eq!(total_price(&items), Decimal::new(5997, 2));

        service
            .remove_item(&store, ProductId::from_i64(1), OptionSelection::new())
            .await?;

        let items = loaded(&service, &store).await?;
        assert_eq!(total_quantity(&items), 0);
        assert_eq!(total_price(&items), Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn signed_in_scenario_matches_guest_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = seed_vendor(&ctx, "Mugs Inc", VendorStatus::Approved).await?;
        let seeded = seed_product(&ctx, ProductSeed::published(vendor, "mug")).await?;
        let shopper = seed_shopper(&ctx, "shopper@example.com").await?;

        let service = CartService::new(Arc::new(ctx.products.clone()), MediaUrls::new("/storage"));
        let store = PgCartStore::new(ctx.db.pool().clone(), shopper);

        service.add_item(&store, seeded.product, 2, None).await?;

        let items = loaded(&service, &store).await?;
        assert_eq!(total_quantity(&items), 2);
        assert_eq!(total_price(&items), Decimal::new(3998, 2));
        assert_eq!(items[0].vendor.name, "Mugs Inc");

        service
            .update_item_quantity(&store, seeded.product, 3, OptionSelection::new())
            .await?;

        let items = loaded(&service, &store).await?;
        assert_eq!(total_quantity(&items), 3);
        assert_eq!(total_price(&items), Decimal::new(5997, 2));

        service
            .remove_item(&store, seeded.product, OptionSelection::new())
            .await?;

        let items = loaded(&service, &store).await?;
        assert_eq!(total_quantity(&items), 0);
        assert_eq!(total_price(&items), Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn add_without_selection_uses_first_options() -> TestResult {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        service.add_item(&store, ProductId::from_i64(1), 1, None).await?;

        let items = loaded(&service, &store).await?;

        assert_eq!(items[0].option_ids, selection(&[(1, 5), (2, 9)]));
        assert_eq!(items[0].price, Decimal::new(1999, 2));
        assert_eq!(items[0].options[0].name, "Red");
        assert_eq!(items[0].options[1].variation_type.name, "Size");

        Ok(())
    }

    #[tokio::test]
    async fn partial_selection_is_completed_before_keying() -> TestResult {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        service
            .add_item(&store, ProductId::from_i64(1), 1, Some(selection(&[(1, 6)])))
            .await?;
        service
            .add_item(&store, ProductId::from_i64(1), 1, Some(selection(&[(1, 6), (2, 9)])))
            .await?;

        let items = loaded(&service, &store).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].option_ids, selection(&[(1, 6), (2, 9)]));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].options[1].variation_type.name, "Size");

        Ok(())
    }

    #[tokio::test]
    async fn variation_price_is_captured() -> TestResult {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        service
            .add_item(&store, ProductId::from_i64(1), 2, Some(selection(&[(2, 10), (1, 6)])))
            .await?;

        let items = loaded(&service, &store).await?;

        assert_eq!(items[0].price, Decimal::new(2450, 2));
        assert_eq!(total_price(&items), Decimal::new(4900, 2));

        Ok(())
    }

    #[tokio::test]
    async fn thumbnail_prefers_option_image() -> TestResult {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        service
            .add_item(&store, ProductId::from_i64(1), 1, Some(selection(&[(1, 6), (2, 10)])))
            .await?;
        service
            .add_item(&store, ProductId::from_i64(1), 1, Some(selection(&[(1, 5), (2, 9)])))
            .await?;

        let items = loaded(&service, &store).await?;
        let images: Vec<Option<&str>> = items.iter().map(|item| item.image.as_deref()).collect();

        assert!(images.contains(&Some("/storage/200/conversions/blue-small.jpg")));
        assert!(images.contains(&Some("/storage/100/conversions/mug-small.jpg")));

        Ok(())
    }

    #[tokio::test]
    async fn lines_for_unlisted_products_are_dropped() -> TestResult {
        let listed = plain_product(1, Decimal::new(1000, 2), owner(7, "Mugs Inc"));
        let store = CookieCartStore::new(None);

        service(vec![listed.clone(), plain_product(2, Decimal::new(500, 2), owner(8, "Gone"))])
            .add_item(&store, ProductId::from_i64(2), 1, None)
            .await?;

        let service = service(vec![listed]);
        service.add_item(&store, ProductId::from_i64(1), 1, None).await?;

        let items = loaded(&service, &store).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, ProductId::from_i64(1));

        Ok(())
    }

    #[tokio::test]
    async fn lines_with_missing_options_are_dropped() -> TestResult {
        let mut product = product_with_variations();
        let store = CookieCartStore::new(None);

        service(vec![product.clone()])
            .add_item(&store, ProductId::from_i64(1), 1, Some(selection(&[(1, 6), (2, 10)])))
            .await?;

        product.variation_types[0].options.retain(|option| option.id != OptionId::from_i64(6));

        let items = loaded(&service(vec![product]), &store).await?;

        assert!(items.is_empty());

        Ok(())
    }

    fn stored(product: i64, quantity: u32, price: Decimal) -> StoredCartItem {
        StoredCartItem {
            uuid: CartItemUuid::new(),
            key: CartKey::new(ProductId::from_i64(product), OptionSelection::new()),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn lines_whose_total_overflows_are_dropped() -> TestResult {
        let huge = Decimal::from_scientific("7e27")?;
        let service = service(vec![
            plain_product(1, Decimal::new(1999, 2), owner(7, "Mugs Inc")),
            plain_product(2, Decimal::new(500, 2), owner(7, "Mugs Inc")),
        ]);

        let mut store = MockCartStore::new();
        store.expect_load().returning(move || {
            Ok(vec![
                stored(1, 2, Decimal::new(1999, 2)),
                stored(2, 4_000_000_000, huge),
            ])
        });

        let items = loaded(&service, &store).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, ProductId::from_i64(1));
        assert_eq!(total_price(&items), Decimal::new(3998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn lines_that_overflow_the_cart_total_are_dropped() -> TestResult {
        let large = Decimal::from_scientific("5e28")?;
        let service = service(vec![
            plain_product(1, Decimal::new(1999, 2), owner(7, "Mugs Inc")),
            plain_product(2, Decimal::new(500, 2), owner(8, "Tea House")),
        ]);

        let mut store = MockCartStore::new();
        store
            .expect_load()
            .returning(move || Ok(vec![stored(1, 1, large), stored(2, 1, large)]));

        let items = loaded(&service, &store).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(total_price(&items), large);

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        let added = service.add_item(&store, ProductId::from_i64(1), 0, None).await;
        let updated = service
            .update_item_quantity(&store, ProductId::from_i64(1), 0, OptionSelection::new())
            .await;

        assert!(matches!(added, Err(CartsServiceError::InvalidQuantity)));
        assert!(matches!(updated, Err(CartsServiceError::InvalidQuantity)));
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let service = service(Vec::new());
        let store = CookieCartStore::new(None);

        let result = service.add_item(&store, ProductId::from_i64(404), 1, None).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn foreign_option_is_rejected() {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        let result = service
            .add_item(&store, ProductId::from_i64(1), 1, Some(selection(&[(1, 99)])))
            .await;

        assert!(matches!(result, Err(CartsServiceError::InvalidSelection)));
    }

    #[tokio::test]
    async fn update_of_absent_line_is_a_no_op() -> TestResult {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        service
            .update_item_quantity(&store, ProductId::from_i64(1), 3, selection(&[(1, 5)]))
            .await?;
        service
            .remove_item(&store, ProductId::from_i64(1), selection(&[(1, 5)]))
            .await?;

        assert!(loaded(&service, &store).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_quantity() -> TestResult {
        let service = service(vec![product_with_variations()]);
        let store = CookieCartStore::new(None);

        service.add_item(&store, ProductId::from_i64(1), 1, None).await?;
        service
            .update_item_quantity(&store, ProductId::from_i64(1), 4, selection(&[(2, 9), (1, 5)]))
            .await?;

        let items = loaded(&service, &store).await?;

        assert_eq!(total_quantity(&items), 4);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_cookie_reads_as_degraded() -> TestResult {
        let service = service(Vec::new());
        let store = CookieCartStore::new(Some("%%%".to_string()));

        let load = service.get_cart_items(&store).await?;

        assert!(load.is_degraded());
        assert!(load.items().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn store_failures_are_errors() {
        let mut store = MockCartStore::new();
        store
            .expect_load()
            .returning(|| Err(CartStoreError::Sql(sqlx::Error::PoolTimedOut)));

        let result = service(Vec::new()).get_cart_items(&store).await;

        assert!(matches!(
            result,
            Err(CartsServiceError::Store(CartStoreError::Sql(_)))
        ));
    }

    #[tokio::test]
    async fn empty_cart_skips_catalogue_lookups() -> TestResult {
        let service = CartService::new(Arc::new(MockProductsService::new()), MediaUrls::new("/"));
        let store = CookieCartStore::new(None);

        assert_eq!(service.get_cart_items(&store).await?, CartLoad::Loaded(Vec::new()));

        Ok(())
    }
}
