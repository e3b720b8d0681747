//! Request-scoped cart access.
//!
//! A [`CartSession`] pairs the [`CartService`] with the store chosen for the
//! current request and remembers the enriched cart, so totals, the mini cart
//! and page props share one read. Mutations go through the session and forget
//! the remembered cart.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::OnceCell;

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        keys::OptionSelection,
        records::{CartItem, CartLoad, Checkout, VendorCartGroup},
        service::CartService,
        stores::CartStore,
        summary,
    },
    products::records::ProductId,
    users::records::UserId,
};

pub struct CartSession {
    service: Arc<CartService>,
    store: Arc<dyn CartStore>,
    cache: OnceCell<CartLoad>,
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CartSession {
    #[must_use]
    pub fn new(service: Arc<CartService>, store: Arc<dyn CartStore>) -> Self {
        Self {
            service,
            store,
            cache: OnceCell::new(),
        }
    }

    /// The enriched cart, read at most once per session.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub async fn load(&self) -> Result<&CartLoad, CartsServiceError> {
        self.cache
            .get_or_try_init(|| self.service.get_cart_items(self.store.as_ref()))
            .await
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub async fn items(&self) -> Result<&[CartItem], CartsServiceError> {
        Ok(self.load().await?.items())
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub async fn total_quantity(&self) -> Result<u64, CartsServiceError> {
        Ok(summary::total_quantity(self.items().await?))
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub async fn total_price(&self) -> Result<Decimal, CartsServiceError> {
        Ok(summary::total_price(self.items().await?))
    }

    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub async fn grouped(&self) -> Result<Vec<VendorCartGroup>, CartsServiceError> {
        Ok(summary::group_by_vendor(self.items().await?))
    }

    /// The cart to hand to payment, for one vendor or all of them.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::EmptyCart`] when no line matches.
    pub async fn checkout(&self, vendor: Option<UserId>) -> Result<Checkout, CartsServiceError> {
        summary::checkout(self.items().await?, vendor).ok_or(CartsServiceError::EmptyCart)
    }

    /// # Errors
    ///
    /// See [`CartService::add_item`].
    pub async fn add_item(
        &mut self,
        product: ProductId,
        quantity: u32,
        selection: Option<OptionSelection>,
    ) -> Result<(), CartsServiceError> {
        self.cache.take();

        self.service
            .add_item(self.store.as_ref(), product, quantity, selection)
            .await
    }

    /// # Errors
    ///
    /// See [`CartService::update_item_quantity`].
    pub async fn update_item_quantity(
        &mut self,
        product: ProductId,
        quantity: u32,
        selection: OptionSelection,
    ) -> Result<(), CartsServiceError> {
        self.cache.take();

        self.service
            .update_item_quantity(self.store.as_ref(), product, quantity, selection)
            .await
    }

    /// # Errors
    ///
    /// See [`CartService::remove_item`].
    pub async fn remove_item(
        &mut self,
        product: ProductId,
        selection: OptionSelection,
    ) -> Result<(), CartsServiceError> {
        self.cache.take();

        self.service
            .remove_item(self.store.as_ref(), product, selection)
            .await
    }
}
