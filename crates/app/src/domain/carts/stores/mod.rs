//! Cart Stores
//!
//! Where a shopper's raw cart lines live: a signed-in user's lines are rows in
//! `cart_items`, a guest's lines travel in the `cartItems` cookie. The store is
//! picked once per request from the caller's identity.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::{
    carts::{
        data::NewCartItem, errors::CartStoreError, keys::CartKey, records::StoredCartItem,
    },
    users::records::UserId,
};

mod cookie;
mod database;

pub use cookie::{CART_COOKIE_NAME, CookieCartStore, GuestCartEntry, encode_entries};
pub use database::PgCartStore;

#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// All raw lines in the cart.
    async fn load(&self) -> Result<Vec<StoredCartItem>, CartStoreError>;

    /// Add a line, or increase the quantity of the line with the same key.
    ///
    /// An existing line takes the new item's price.
    async fn add(&self, item: NewCartItem) -> Result<(), CartStoreError>;

    /// Replace the quantity of an existing line. Returns `false` when the key is absent.
    async fn update_quantity(&self, key: &CartKey, quantity: u32)
    -> Result<bool, CartStoreError>;

    /// Delete a line. Returns `false` when the key is absent.
    async fn remove(&self, key: &CartKey) -> Result<bool, CartStoreError>;
}

/// Hands out the persistent cart of a signed-in user.
#[automock]
pub trait UserCartStores: Send + Sync {
    fn store_for(&self, user: UserId) -> Arc<dyn CartStore>;
}

#[derive(Debug, Clone)]
pub struct PgUserCartStores {
    pool: PgPool,
}

impl PgUserCartStores {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserCartStores for PgUserCartStores {
    fn store_for(&self, user: UserId) -> Arc<dyn CartStore> {
        Arc::new(PgCartStore::new(self.pool.clone(), user))
    }
}
