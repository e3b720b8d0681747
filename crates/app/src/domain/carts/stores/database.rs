//! Database cart store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::domain::{
    carts::{
        data::NewCartItem,
        errors::CartStoreError,
        keys::CartKey,
        records::StoredCartItem,
        repository::PgCartItemsRepository,
        stores::CartStore,
    },
    users::records::UserId,
};

/// The `cart_items` rows of one user.
#[derive(Debug, Clone)]
pub struct PgCartStore {
    user: UserId,
    repository: PgCartItemsRepository,
}

impl PgCartStore {
    #[must_use]
    pub fn new(pool: PgPool, user: UserId) -> Self {
        Self {
            user,
            repository: PgCartItemsRepository::new(pool),
        }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn load(&self) -> Result<Vec<StoredCartItem>, CartStoreError> {
        Ok(self.repository.list_cart_items(self.user).await?)
    }

    async fn add(&self, item: NewCartItem) -> Result<(), CartStoreError> {
        self.repository.upsert_cart_item(self.user, &item).await?;

        debug!(user = %self.user, key = %item.key, quantity = item.quantity, "cart line added");

        Ok(())
    }

    async fn update_quantity(
        &self,
        key: &CartKey,
        quantity: u32,
    ) -> Result<bool, CartStoreError> {
        let rows_affected = self
            .repository
            .update_cart_item_quantity(self.user, key, quantity)
            .await?;

        Ok(rows_affected > 0)
    }

    async fn remove(&self, key: &CartKey) -> Result<bool, CartStoreError> {
        let rows_affected = self.repository.delete_cart_item(self.user, key).await?;

        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{
                keys::OptionSelection,
                records::CartItemUuid,
                stores::{PgUserCartStores, UserCartStores},
            },
            products::records::ProductId,
            users::records::VendorStatus,
        },
        test::{
            TestContext,
            helpers::{ProductSeed, seed_product, seed_shopper, seed_vendor},
        },
    };

    use super::*;

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn adding_the_same_key_twice_merges_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = seed_vendor(&ctx, "Mugs Inc", VendorStatus::Approved).await?;
        let seeded = seed_product(&ctx, ProductSeed::published(vendor, "mug")).await?;
        let shopper = seed_shopper(&ctx, "shopper@example.com").await?;

        let store = PgUserCartStores::new(ctx.db.pool().clone()).store_for(shopper);
        let key = CartKey::new(seeded.product, OptionSelection::new());

        for (quantity, price) in [(2, Decimal::new(1999, 2)), (1, Decimal::new(1799, 2))] {
            store
                .add(NewCartItem {
                    uuid: CartItemUuid::new(),
                    key: key.clone(),
                    quantity,
                    price,
                })
                .await?;
        }

        let lines = store.load().await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].key, key);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price, Decimal::new(1799, 2));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn update_and_remove_report_absent_keys() -> TestResult {
        let ctx = TestContext::new().await;
        let shopper = seed_shopper(&ctx, "shopper@example.com").await?;

        let store = PgCartStore::new(ctx.db.pool().clone(), shopper);
        let key = CartKey::new(ProductId::from_i64(999), OptionSelection::new());

        assert!(!store.update_quantity(&key, 4).await?);
        assert!(!store.remove(&key).await?);
        assert!(store.load().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn carts_are_scoped_to_their_user() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = seed_vendor(&ctx, "Mugs Inc", VendorStatus::Approved).await?;
        let seeded = seed_product(&ctx, ProductSeed::published(vendor, "mug")).await?;
        let alice = seed_shopper(&ctx, "alice@example.com").await?;
        let bob = seed_shopper(&ctx, "bob@example.com").await?;

        PgCartStore::new(ctx.db.pool().clone(), alice)
            .add(NewCartItem {
                uuid: CartItemUuid::new(),
                key: CartKey::new(seeded.product, OptionSelection::new()),
                quantity: 1,
                price: Decimal::new(1999, 2),
            })
            .await?;

        let bobs = PgCartStore::new(ctx.db.pool().clone(), bob).load().await?;

        assert!(bobs.is_empty());

        Ok(())
    }
}
